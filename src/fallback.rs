// Static keyword-triggered replies used while retrieval is unavailable
use serde::{Deserialize, Serialize};

use crate::engine::AnswerResult;

/// One `(trigger, answer)` pair; the trigger is matched as a substring
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackEntry {
    pub trigger: String,
    pub answer: String,
}

impl FallbackEntry {
    pub fn new(trigger: &str, answer: &str) -> Self {
        Self {
            trigger: trigger.to_string(),
            answer: answer.to_string(),
        }
    }
}

/// Fallback table configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FallbackConfig {
    /// Reply when no trigger matches
    pub default_answer: String,
    /// Checked in order; the first matching trigger wins
    pub entries: Vec<FallbackEntry>,
}

const GREETING: &str =
    "Olá! Como posso ajudar você hoje? Posso informar sobre o Programa Farmácia Popular do Brasil.";

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            entries: vec![
                FallbackEntry::new("olá", GREETING),
                FallbackEntry::new("oi", GREETING),
                FallbackEntry::new(
                    "o que é",
                    "O Programa Farmácia Popular do Brasil é uma iniciativa do Governo Federal que oferece \
                     medicamentos gratuitos ou com descontos de até 90% para tratamento de doenças comuns na população.",
                ),
                FallbackEntry::new(
                    "como funciona",
                    "O programa funciona em duas modalidades: Rede Própria (unidades próprias) e Sistema de \
                     Co-pagamento (parceria com farmácias privadas). Para utilizar, é necessário apresentar \
                     documento de identidade, CPF e receita médica válida.",
                ),
                FallbackEntry::new(
                    "medicamentos",
                    "O programa oferece medicamentos para hipertensão, diabetes, asma, dislipidemia, rinite, \
                     doença de Parkinson, osteoporose, glaucoma, entre outros. Alguns são totalmente gratuitos, \
                     como os para hipertensão e diabetes.",
                ),
                FallbackEntry::new(
                    "quem pode usar",
                    "Qualquer cidadão brasileiro pode utilizar o Programa Farmácia Popular, independentemente da \
                     idade ou condição socioeconômica. É necessário apenas apresentar documentos pessoais e \
                     receita médica válida nas farmácias credenciadas.",
                ),
                FallbackEntry::new(
                    "onde encontrar",
                    "As farmácias credenciadas podem ser identificadas pela marca do Programa Farmácia Popular \
                     do Brasil. Você também pode consultar as unidades mais próximas no site do Ministério da \
                     Saúde ou pelo telefone 136.",
                ),
                FallbackEntry::new(
                    "documentos",
                    "Para adquirir medicamentos, é necessário apresentar: documento de identidade com foto, CPF \
                     e receita médica válida (do SUS ou particular) dentro do prazo de validade (geralmente 120 \
                     dias para medicamentos de uso contínuo).",
                ),
                FallbackEntry::new(
                    "gratuitos",
                    "Os medicamentos gratuitos incluem: Losartana, Captopril, Propranolol, Atenolol, Metformina, \
                     Glibenclamida, Insulina NPH, Insulina Regular, Salbutamol e outros para hipertensão, \
                     diabetes e asma.",
                ),
            ],
            default_answer: "O Programa Farmácia Popular oferece medicamentos gratuitos ou com desconto para a \
                população. Para mais informações, pergunte sobre como funciona, medicamentos disponíveis, \
                documentos necessários ou onde encontrar."
                .to_string(),
        }
    }
}

/// Substring-triggered canned responder
#[derive(Debug, Clone)]
pub struct FallbackResponder {
    entries: Vec<FallbackEntry>,
    default_answer: String,
}

impl Default for FallbackResponder {
    fn default() -> Self {
        Self::with_config(FallbackConfig::default())
    }
}

impl FallbackResponder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: FallbackConfig) -> Self {
        let entries = config
            .entries
            .into_iter()
            .filter(|e| !e.trigger.trim().is_empty())
            .map(|e| FallbackEntry {
                trigger: e.trigger.to_lowercase(),
                answer: e.answer,
            })
            .collect();

        Self {
            entries,
            default_answer: config.default_answer,
        }
    }

    /// Reply for `message`; always attributed to the fallback source
    pub fn respond(&self, message: &str) -> AnswerResult {
        let message_lower = message.to_lowercase();
        let answer = self
            .entries
            .iter()
            .find(|e| message_lower.contains(e.trigger.as_str()))
            .map(|e| e.answer.as_str())
            .unwrap_or(&self.default_answer);

        AnswerResult::fallback(answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::AnswerSource;

    #[test]
    fn test_greeting_matches_regardless_of_case() {
        let responder = FallbackResponder::new();
        let result = responder.respond("Olá, tudo bem?");
        assert_eq!(result.answer, GREETING);
        assert_eq!(result.source, AnswerSource::Fallback);
    }

    #[test]
    fn test_first_trigger_in_order_wins() {
        let responder = FallbackResponder::new();
        // "medicamentos" is listed before "gratuitos"
        let result = responder.respond("Quais medicamentos gratuitos existem?");
        assert!(result.answer.starts_with("O programa oferece medicamentos"));
    }

    #[test]
    fn test_unknown_message_gets_default() {
        let responder = FallbackResponder::new();
        let result = responder.respond("xyz");
        assert_eq!(result.answer, FallbackConfig::default().default_answer);
        assert_eq!(result.source, AnswerSource::Fallback);
    }

    #[test]
    fn test_custom_table() {
        let responder = FallbackResponder::with_config(FallbackConfig {
            entries: vec![FallbackEntry::new("Horário", "Das 8h às 18h."), FallbackEntry::new("", "nunca")],
            default_answer: "Sem resposta.".to_string(),
        });
        assert_eq!(responder.respond("qual o horário?").answer, "Das 8h às 18h.");
        assert_eq!(responder.respond("abc").answer, "Sem resposta.");
    }
}
