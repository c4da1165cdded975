// Corpus loader: reads every `.txt` file directly inside the knowledge base directory
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::errors::{RagError, Result};

const DOCUMENT_EXTENSION: &str = "txt";

/// A single knowledge base document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Trimmed file contents
    pub text: String,
    /// File the text was read from (used for logging only)
    pub origin: PathBuf,
}

/// Documents in discovery order; the position is the document's identity
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    documents: Vec<Document>,
}

impl Corpus {
    pub fn new(documents: Vec<Document>) -> Self {
        Self { documents }
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Document> {
        self.documents.get(index)
    }

    /// Borrow all document texts in index order
    pub fn texts(&self) -> Vec<&str> {
        self.documents.iter().map(|d| d.text.as_str()).collect()
    }
}

/// Load all non-empty `.txt` documents from `dir` (no recursion).
///
/// A missing directory or one without text files yields an empty corpus.
/// Unreadable or non-UTF-8 files are errors.
pub fn load_corpus(dir: &Path) -> Result<Corpus> {
    let files = list_text_files(dir)?;

    if files.is_empty() {
        warn!("No documents found in {}", dir.display());
    }

    let mut documents = Vec::with_capacity(files.len());
    for path in files {
        let contents = fs::read_to_string(&path).map_err(|source| RagError::CorpusRead {
            path: path.clone(),
            source,
        })?;

        let text = contents.trim();
        if text.is_empty() {
            warn!("Skipping empty document: {}", path.display());
            continue;
        }

        debug!(path = %path.display(), chars = text.chars().count(), "Loaded document");
        documents.push(Document {
            text: text.to_string(),
            origin: path,
        });
    }

    info!("Documents loaded: {}", documents.len());
    Ok(Corpus::new(documents))
}

fn list_text_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(RagError::Io(e)),
    };

    let mut files = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if path.is_file() && has_text_extension(&path) {
            files.push(path);
        }
    }

    Ok(files)
}

/// Same selection as a `*.txt` shell glob: exact extension, hidden files excluded
fn has_text_extension(path: &Path) -> bool {
    let hidden = path
        .file_name()
        .and_then(|name| name.to_str())
        .map_or(true, |name| name.starts_with('.'));

    !hidden && path.extension().and_then(|ext| ext.to_str()) == Some(DOCUMENT_EXTENSION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_directory_yields_empty_corpus() {
        let dir = TempDir::new().unwrap();
        let corpus = load_corpus(&dir.path().join("does-not-exist")).unwrap();
        assert!(corpus.is_empty());
    }

    #[test]
    fn test_empty_directory_yields_empty_corpus() {
        let dir = TempDir::new().unwrap();
        let corpus = load_corpus(dir.path()).unwrap();
        assert_eq!(corpus.len(), 0);
    }

    #[test]
    fn test_contents_are_trimmed() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.txt"), "\n\n  Receita médica válida.  \n").unwrap();

        let corpus = load_corpus(dir.path()).unwrap();
        assert_eq!(corpus.len(), 1);
        assert_eq!(corpus.get(0).unwrap().text, "Receita médica válida.");
    }

    #[test]
    fn test_blank_files_are_skipped() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("vazio.txt"), "   \n\t \n").unwrap();
        fs::write(dir.path().join("cheio.txt"), "Conteúdo").unwrap();

        let corpus = load_corpus(dir.path()).unwrap();
        assert_eq!(corpus.len(), 1);
        assert_eq!(corpus.texts(), vec!["Conteúdo"]);
    }

    #[test]
    fn test_only_txt_files_at_top_level() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("notas.md"), "ignorado").unwrap();
        fs::write(dir.path().join("leiame.txt"), "incluído").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub").join("interno.txt"), "sem recursão").unwrap();

        let corpus = load_corpus(dir.path()).unwrap();
        assert_eq!(corpus.texts(), vec!["incluído"]);
    }

    #[test]
    fn test_uppercase_extension_and_hidden_files_are_skipped() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("A.TXT"), "maiúsculas").unwrap();
        fs::write(dir.path().join(".oculto.txt"), "oculto").unwrap();
        fs::write(dir.path().join("visivel.txt"), "visível").unwrap();

        let corpus = load_corpus(dir.path()).unwrap();
        assert_eq!(corpus.texts(), vec!["visível"]);
    }

    #[test]
    fn test_invalid_utf8_is_an_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("binario.txt"), [0xff, 0xfe, 0x00, 0x41]).unwrap();

        let err = load_corpus(dir.path()).unwrap_err();
        assert!(matches!(err, RagError::CorpusRead { .. }));
    }

    #[test]
    fn test_origin_is_recorded() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("programa.txt");
        fs::write(&path, "Farmácia Popular").unwrap();

        let corpus = load_corpus(dir.path()).unwrap();
        assert_eq!(corpus.get(0).unwrap().origin, path);
    }
}
