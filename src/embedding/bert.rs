// BERT sentence embeddings via Candle, weights fetched from the HuggingFace Hub
use anyhow::Context;
use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::bert::{BertModel, Config};
use hf_hub::{api::sync::Api, Repo, RepoType};
use tokenizers::{Tokenizer, TruncationParams};
use tracing::info;

use super::{Embedder, EmbedderLoader, EmbeddingConfig};
use crate::errors::{RagError, Result};

/// Mean-pooled BERT encoder
pub struct BertEmbedder {
    model: BertModel,
    tokenizer: Tokenizer,
    device: Device,
    dimension: usize,
}

impl BertEmbedder {
    /// Download (or reuse the cached copy of) the model and build it on CPU
    pub fn from_hub(config: &EmbeddingConfig) -> Result<Self> {
        Self::try_from_hub(config).map_err(|e| RagError::ModelLoad(format!("{:#}", e)))
    }

    fn try_from_hub(config: &EmbeddingConfig) -> anyhow::Result<Self> {
        let device = Device::Cpu;

        info!(model = %config.model_id, revision = %config.revision, "Loading embedding model");

        let api = Api::new().context("Failed to create HuggingFace API client")?;
        let repo = api.repo(Repo::with_revision(
            config.model_id.clone(),
            RepoType::Model,
            config.revision.clone(),
        ));

        let config_path = repo.get("config.json")
            .context("Failed to download model config")?;
        let tokenizer_path = repo.get("tokenizer.json")
            .context("Failed to download tokenizer")?;
        let weights_path = repo.get("model.safetensors")
            .context("Failed to download model weights")?;

        let config_contents = std::fs::read_to_string(config_path)
            .context("Failed to read config file")?;
        let bert_config: Config = serde_json::from_str(&config_contents)
            .context("Failed to parse model config")?;
        let raw: serde_json::Value = serde_json::from_str(&config_contents)
            .context("Failed to parse model config")?;
        let dimension = raw
            .get("hidden_size")
            .and_then(|v| v.as_u64())
            .context("Model config has no hidden_size")? as usize;

        let mut tokenizer = Tokenizer::from_file(tokenizer_path)
            .map_err(|e| anyhow::anyhow!("Failed to load tokenizer: {}", e))?;
        // Batches are padded by hand in encode()
        tokenizer.with_padding(None);
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: config.max_sequence_length,
                ..Default::default()
            }))
            .map_err(|e| anyhow::anyhow!("Failed to configure truncation: {}", e))?;

        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, &device)
                .context("Failed to load model weights")?
        };
        let model = BertModel::load(vb, &bert_config)
            .context("Failed to create BERT model")?;

        info!(dimension, "Embedding model ready");

        Ok(Self {
            model,
            tokenizer,
            device,
            dimension,
        })
    }

    /// Mean pooling with attention mask
    fn mean_pool(embeddings: &Tensor, attention_mask: &Tensor) -> Result<Tensor> {
        let mask_expanded = attention_mask
            .unsqueeze(2)?
            .expand(embeddings.shape())?
            .to_dtype(embeddings.dtype())?;

        let sum_embeddings = (embeddings * &mask_expanded)?.sum(1)?;
        let sum_mask = mask_expanded.sum(1)?.clamp(1e-9, f64::MAX)?;

        Ok(sum_embeddings.broadcast_div(&sum_mask)?)
    }
}

impl Embedder for BertEmbedder {
    fn encode(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let encodings = self.tokenizer
            .encode_batch(texts.to_vec(), true)
            .map_err(|e| RagError::Tokenization(e.to_string()))?;

        let batch_size = encodings.len();
        let max_len = encodings.iter().map(|e| e.get_ids().len()).max().unwrap_or(0);

        let mut flat_ids = vec![0u32; batch_size * max_len];
        let mut flat_mask = vec![0u32; batch_size * max_len];
        for (row, encoding) in encodings.iter().enumerate() {
            let ids = encoding.get_ids();
            let mask = encoding.get_attention_mask();
            let offset = row * max_len;
            flat_ids[offset..offset + ids.len()].copy_from_slice(ids);
            flat_mask[offset..offset + mask.len()].copy_from_slice(mask);
        }

        let token_ids = Tensor::from_vec(flat_ids, (batch_size, max_len), &self.device)?;
        let attention_mask = Tensor::from_vec(flat_mask, (batch_size, max_len), &self.device)?;
        let token_type_ids = token_ids.zeros_like()?;

        let hidden = self.model.forward(&token_ids, &token_type_ids, Some(&attention_mask))?;
        let pooled = Self::mean_pool(&hidden, &attention_mask)?;

        Ok(pooled.to_vec2::<f32>()?)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

/// Default loader: builds a [`BertEmbedder`] from the HuggingFace Hub
#[derive(Debug, Clone, Copy, Default)]
pub struct HubLoader;

impl EmbedderLoader for HubLoader {
    fn load(&self, config: &EmbeddingConfig) -> Result<Box<dyn Embedder>> {
        Ok(Box::new(BertEmbedder::from_hub(config)?))
    }
}
