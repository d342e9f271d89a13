//! Download filenames.

use card_core::{Artifact, ModeDescriptor};

/// Filename prefix shared by every export.
const PREFIX: &str = "saatmishaali";

/// Deterministic filename for an exported card.
///
/// `saatmishaali-{slug}-{suffix}.png`, where the slug is the artifact's
/// identifying field (attribution or meme category) with whitespace runs
/// collapsed to `-` and lowercased. Path separators never survive.
#[must_use]
pub fn export_filename(artifact: &Artifact) -> String {
    let descriptor = ModeDescriptor::of(artifact.mode());
    format!(
        "{PREFIX}-{}-{}.png",
        slugify(artifact.identifying_field()),
        descriptor.filename_suffix
    )
}

fn slugify(input: &str) -> String {
    input
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .replace(['/', '\\'], "-")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use card_core::{MemeArtifact, QuoteArtifact};
    use proptest::prelude::*;

    fn quote(author: &str) -> Artifact {
        QuoteArtifact::new("text", author, "life", true)
            .expect("quote")
            .into()
    }

    #[test]
    fn test_bengali_attribution() {
        assert_eq!(
            export_filename(&quote("হুমায়ূন আহমেদ")),
            "saatmishaali-হুমায়ূন-আহমেদ-quote.png"
        );
    }

    #[test]
    fn test_latin_attribution_is_lowercased() {
        assert_eq!(
            export_filename(&quote("Rabindranath   Tagore")),
            "saatmishaali-rabindranath-tagore-quote.png"
        );
    }

    #[test]
    fn test_meme_uses_category() {
        let meme: Artifact = MemeArtifact::new("text", "ঢাকার জ্যাম", "", true)
            .expect("meme")
            .into();
        assert_eq!(
            export_filename(&meme),
            "saatmishaali-ঢাকার-জ্যাম-meme.png"
        );
    }

    #[test]
    fn test_path_separators_are_replaced() {
        let name = export_filename(&quote("a/b\\c"));
        assert_eq!(name, "saatmishaali-a-b-c-quote.png");
    }

    proptest! {
        #[test]
        fn prop_filename_is_deterministic_and_flat(author in "\\PC{1,40}") {
            prop_assume!(!author.trim().is_empty());
            let artifact = quote(&author);
            let first = export_filename(&artifact);
            prop_assert_eq!(&first, &export_filename(&artifact));
            prop_assert!(first.starts_with("saatmishaali-"));
            prop_assert!(first.ends_with("-quote.png"));
            prop_assert!(!first.contains('/'));
            prop_assert!(!first.chars().any(char::is_whitespace));
        }
    }
}
