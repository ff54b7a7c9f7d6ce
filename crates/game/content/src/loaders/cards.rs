//! Card catalog loader.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tactics_core::CardTemplate;

use crate::loaders::{LoadResult, ensure_unique, read_file};

/// Card catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardCatalog {
    pub cards: Vec<CardTemplate>,
}

/// Loader for the card catalog from RON files.
pub struct CardLoader;

impl CardLoader {
    /// Load the card catalog from a RON file.
    ///
    /// Card ids must be unique.
    pub fn load(path: &Path) -> LoadResult<Vec<CardTemplate>> {
        let content = read_file(path)?;
        let catalog: CardCatalog = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse card catalog RON: {}", e))?;

        ensure_unique("card", path, catalog.cards.iter().map(|card| &card.id))?;
        Ok(catalog.cards)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tactics_core::{CardType, EffectKind, Orientation, TargetSelector};

    use super::*;

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(content.as_bytes()).expect("write");
        file
    }

    #[test]
    fn loads_both_orientations_and_legacy_lists() {
        let file = write_temp(
            r#"(
    cards: [
        (
            id: "ember",
            name: "Ember",
            cost: 1,
            card_type: Attack,
            element: Fire,
            upright: [(kind: Damage, magnitude: 6, target: Target)],
            reversed: [(kind: DamageOverTime, magnitude: 2, duration: Some(3), target: Target)],
        ),
        (
            id: "guard",
            name: "Guard",
            cost: 1,
            card_type: Skill,
            effects: [(kind: Shield, magnitude: 5)],
        ),
    ],
)"#,
        );

        let cards = CardLoader::load(file.path()).expect("load");
        assert_eq!(cards.len(), 2);

        let ember = &cards[0];
        assert_eq!(ember.card_type, CardType::Attack);
        assert_eq!(ember.damage_for(Orientation::Upright), 6);
        let reversed = ember.effects_for(Orientation::Reversed);
        assert_eq!(reversed[0].kind, EffectKind::DamageOverTime);
        assert_eq!(reversed[0].duration, Some(3));

        let guard = &cards[1];
        let upright = guard.effects_for(Orientation::Upright);
        assert_eq!(upright[0].kind, EffectKind::Shield);
        assert_eq!(upright[0].target, TargetSelector::Caster);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let file = write_temp(
            r#"(cards: [
    (id: "strike", name: "Strike", cost: 1, card_type: Attack),
    (id: "strike", name: "Strike", cost: 1, card_type: Attack),
])"#,
        );
        let error = CardLoader::load(file.path()).expect_err("duplicate");
        assert!(error.to_string().contains("Duplicate card id 'strike'"));
    }
}
