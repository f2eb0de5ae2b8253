//! Provider identification types.

/// Provider type enum for matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderType {
    HuggingFace,
    Ollama,
}

impl ProviderType {
    /// Parse provider type from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "huggingface" | "hf" => Some(Self::HuggingFace),
            "ollama" => Some(Self::Ollama),
            _ => None,
        }
    }

    /// Get the canonical provider name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HuggingFace => "huggingface",
            Self::Ollama => "ollama",
        }
    }

    /// Whether the provider needs a bearer credential.
    pub fn requires_credential(&self) -> bool {
        matches!(self, Self::HuggingFace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_type_parsing() {
        assert_eq!(
            ProviderType::parse("HuggingFace"),
            Some(ProviderType::HuggingFace)
        );
        assert_eq!(ProviderType::parse("hf"), Some(ProviderType::HuggingFace));
        assert_eq!(ProviderType::parse("ollama"), Some(ProviderType::Ollama));
        assert_eq!(ProviderType::parse("openai"), None);
    }

    #[test]
    fn test_credential_requirements() {
        assert!(ProviderType::HuggingFace.requires_credential());
        assert!(!ProviderType::Ollama.requires_credential());
    }
}
