//! Unlockable character catalog.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub description: String,
    pub cost: u64,
    pub unlocked: bool,
}

impl Character {
    fn new(id: &str, name: &str, icon: &str, description: &str, cost: u64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            icon: icon.into(),
            description: description.into(),
            cost,
            unlocked: cost == 0,
        }
    }
}

/// Store listing row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterView {
    #[serde(flatten)]
    pub character: Character,
    pub affordable: bool,
    pub selected: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    characters: Vec<Character>,
    selected: String,
}

impl Catalog {
    pub const DEFAULT_CHARACTER: &'static str = "default";

    /// The stock seven-character lineup with the free character selected.
    pub fn standard() -> Self {
        Self {
            characters: vec![
                Character::new("default", "NDGM Student", "👨‍🎓", "Default character", 0),
                Character::new("ninja", "Focus Ninja", "🥷", "Master of concentration", 200),
                Character::new("astronaut", "Space Explorer", "👨‍🚀", "Reaches for the stars", 500),
                Character::new("wizard", "Time Management Wizard", "🧙‍♂️", "Controls the flow of time", 1000),
                Character::new("robot", "A.I. Robot", "🤖", "Efficiency incarnate", 3000),
                Character::new("cat", "Normal House Cat", "🐱", "Surprisingly productive", 5000),
                Character::new("hacker", "Hacker Man", "👨‍💻", "Master of time and space", 10000),
            ],
            selected: Self::DEFAULT_CHARACTER.to_string(),
        }
    }

    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    pub fn get(&self, id: &str) -> Option<&Character> {
        self.characters.iter().find(|c| c.id == id)
    }

    pub fn selected(&self) -> &Character {
        // `selected` only ever holds an id that exists in `characters`.
        self.get(&self.selected).unwrap_or(&self.characters[0])
    }

    /// Unlock `id` if it is locked and `points` covers it. Returns the cost to deduct.
    pub fn purchase(&mut self, id: &str, points: u64) -> Option<u64> {
        let character = self
            .characters
            .iter_mut()
            .find(|c| c.id == id && !c.unlocked && points >= c.cost)?;
        character.unlocked = true;
        Some(character.cost)
    }

    /// Select an unlocked character. Returns `false` when rejected.
    pub fn select(&mut self, id: &str) -> bool {
        let Some(id) = self.get(id).filter(|c| c.unlocked).map(|c| c.id.clone()) else {
            return false;
        };
        self.selected = id;
        true
    }

    pub fn view(&self, points: u64) -> Vec<CharacterView> {
        self.characters
            .iter()
            .map(|c| CharacterView {
                character: c.clone(),
                affordable: points >= c.cost,
                selected: c.id == self.selected,
            })
            .collect()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_lineup() {
        let catalog = Catalog::standard();
        let costs: Vec<_> = catalog.characters().iter().map(|c| c.cost).collect();
        assert_eq!(costs, vec![0, 200, 500, 1000, 3000, 5000, 10000]);
        let unlocked: Vec<_> = catalog
            .characters()
            .iter()
            .filter(|c| c.unlocked)
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(unlocked, vec!["default"]);
        assert_eq!(catalog.selected().id, "default");
    }

    #[test]
    fn purchase_needs_enough_points() {
        let mut catalog = Catalog::standard();
        assert_eq!(catalog.purchase("astronaut", 499), None);
        assert!(!catalog.get("astronaut").unwrap().unlocked);
        assert_eq!(catalog.purchase("astronaut", 500), Some(500));
        assert!(catalog.get("astronaut").unwrap().unlocked);
    }

    #[test]
    fn purchase_unlocked_is_noop() {
        let mut catalog = Catalog::standard();
        assert_eq!(catalog.purchase("default", 100), None);
        catalog.purchase("ninja", 200);
        assert_eq!(catalog.purchase("ninja", 10_000), None);
    }

    #[test]
    fn purchase_unknown_is_noop() {
        let mut catalog = Catalog::standard();
        assert_eq!(catalog.purchase("dragon", u64::MAX), None);
    }

    #[test]
    fn select_requires_unlock() {
        let mut catalog = Catalog::standard();
        assert!(!catalog.select("wizard"));
        assert_eq!(catalog.selected().id, "default");
        catalog.purchase("wizard", 1000);
        assert!(catalog.select("wizard"));
        assert_eq!(catalog.selected().id, "wizard");
        assert!(!catalog.select("nobody"));
        assert_eq!(catalog.selected().id, "wizard");
    }

    #[test]
    fn view_flags() {
        let catalog = Catalog::standard();
        let view = catalog.view(500);
        let astronaut = view.iter().find(|v| v.character.id == "astronaut").unwrap();
        assert!(astronaut.affordable);
        assert!(!astronaut.selected);
        let wizard = view.iter().find(|v| v.character.id == "wizard").unwrap();
        assert!(!wizard.affordable);
        assert!(view[0].selected);
    }
}
