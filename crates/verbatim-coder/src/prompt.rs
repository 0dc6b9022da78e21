//! Prompt template for qualitative thematic coding

/// Builds the coding instruction for one transcript excerpt
pub struct PromptBuilder<'a> {
    excerpt: &'a str,
}

impl<'a> PromptBuilder<'a> {
    /// Create a new prompt builder
    pub fn new(excerpt: &'a str) -> Self {
        Self { excerpt }
    }

    /// Build the complete prompt
    pub fn build(&self) -> String {
        let mut prompt = String::with_capacity(
            ROLE_AND_CONTEXT.len() + self.excerpt.len() + TASK_AND_FORMAT.len() + 8,
        );

        prompt.push_str(ROLE_AND_CONTEXT);
        prompt.push_str("\"\"\"");
        prompt.push_str(self.excerpt);
        prompt.push_str("\"\"\"\n");
        prompt.push_str(TASK_AND_FORMAT);

        prompt
    }
}

const ROLE_AND_CONTEXT: &str = "
Tu es un sociologue expert en analyse qualitative.

Voici un extrait d'entretien réalisé avec un étudiant :

";

// The two trailing spaces on the theme and sub-theme lines are part of the
// template sent on every request.
const TASK_AND_FORMAT: &str = concat!(
    "\n",
    "Ta tâche :\n",
    "- Identifie des thèmes généraux pertinents,\n",
    "- Pour chaque thème, donne un sous-thème spécifique,\n",
    "- Et pour chaque sous-thème, donne un verbatim exact (citation tirée du texte).\n",
    "\n",
    "Réponds uniquement avec le format suivant (sans introduction, sans analyse), 3 à 5 blocs maximum :\n",
    "\n",
    "Thème : [nom du thème]  \n",
    "Sous-thème : [nom du sous-thème]  \n",
    "Verbatim : \"Phrase complète tirée du texte, sans la tronquer, même si elle est longue.\"\n",
    "\n",
    "Important :\n",
    "- N'utilise pas de format JSON.\n",
    "- Ne dépasse pas 500 tokens.\n",
    "- Reste concis et clair.\n",
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_wraps_excerpt_in_triple_quotes() {
        let prompt = PromptBuilder::new("J'ai choisi la sociologie par hasard.").build();
        assert!(prompt.contains("\"\"\"J'ai choisi la sociologie par hasard.\"\"\""));
    }

    #[test]
    fn test_prompt_includes_instructions() {
        let prompt = PromptBuilder::new("x").build();
        assert!(prompt.contains("sociologue expert en analyse qualitative"));
        assert!(prompt.contains("3 à 5 blocs maximum"));
        assert!(prompt.contains("N'utilise pas de format JSON."));
    }

    #[test]
    fn test_prompt_shows_expected_layout() {
        let prompt = PromptBuilder::new("x").build();
        let theme = prompt.find("Thème : [nom du thème]").unwrap();
        let sub = prompt.find("Sous-thème : [nom du sous-thème]").unwrap();
        let verbatim = prompt.find("Verbatim : \"Phrase complète").unwrap();
        assert!(theme < sub && sub < verbatim);
    }

    #[test]
    fn test_excerpt_precedes_task() {
        let prompt = PromptBuilder::new("EXCERPT-MARKER").build();
        assert!(prompt.find("EXCERPT-MARKER").unwrap() < prompt.find("Ta tâche").unwrap());
    }

    #[test]
    fn test_layout_lines_keep_trailing_spaces() {
        let prompt = PromptBuilder::new("x").build();
        assert!(prompt.contains("Thème : [nom du thème]  \nSous-thème : [nom du sous-thème]  \nVerbatim : "));
        assert!(prompt.contains("longue.\"\n\nImportant :"));
    }

    #[test]
    fn test_prompt_frame_is_exact() {
        let prompt = PromptBuilder::new("EXTRAIT").build();
        assert!(prompt.starts_with("\nTu es un sociologue expert en analyse qualitative.\n\n"));
        assert!(prompt.contains("étudiant :\n\n\"\"\"EXTRAIT\"\"\"\n\nTa tâche :\n"));
        assert!(prompt.ends_with("- Reste concis et clair.\n"));
    }
}
