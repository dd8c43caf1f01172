use include_dir::{include_dir, Dir};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::error::Error;

static CATALOG_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/catalog");

/// How many of a script's basic characters are offered for practice
pub const PRACTICE_CHARACTERS: usize = 12;

#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq, strum_macros::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ScriptStatus {
    Active,
    Endangered,
    Revitalized,
}

#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq, strum_macros::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ScriptCategory {
    Brahmi,
    Arabic,
    Indigenous,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct WordExample {
    pub word: String,
    pub meaning: String,
    pub script: String,
}

#[derive(Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Script {
    pub id: String,
    pub name: String,
    pub region: String,
    pub glyph: String,
    pub description: String,
    pub origin: String,
    pub status: ScriptStatus,
    pub period: String,
    pub category: ScriptCategory,
    pub writing_system: String,
    pub coordinates: (f64, f64),
    pub basic_characters: Vec<String>,
    #[serde(default)]
    pub numbers: Vec<String>,
    #[serde(default)]
    pub examples: Vec<WordExample>,
    #[serde(default)]
    pub rules: Vec<String>,
}

impl Script {
    pub fn practice_characters(&self) -> &[String] {
        let n = self.basic_characters.len().min(PRACTICE_CHARACTERS);
        &self.basic_characters[..n]
    }
}

#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq, strum_macros::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StoryCategory {
    Folklore,
    Legend,
    Myth,
    Historical,
}

impl StoryCategory {
    pub const ALL: [StoryCategory; 4] = [
        StoryCategory::Folklore,
        StoryCategory::Legend,
        StoryCategory::Myth,
        StoryCategory::Historical,
    ];
}

#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq, strum_macros::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [
        Difficulty::Beginner,
        Difficulty::Intermediate,
        Difficulty::Advanced,
    ];
}

#[derive(Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Story {
    pub id: String,
    pub title: String,
    pub title_original: String,
    /// id of the script the story is written in
    pub aksara: String,
    pub region: String,
    pub category: StoryCategory,
    pub difficulty: Difficulty,
    pub summary: String,
    pub moral_lesson: String,
    pub original_text: String,
    pub transliteration: String,
    pub translation: String,
}

#[derive(Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct MapLocation {
    pub id: String,
    pub name: String,
    pub coordinates: (f64, f64),
    pub aksara: Vec<String>,
    pub description: String,
    pub historical_period: String,
    pub region: String,
}

/// Read-only content repository. Lookups by id return `None` for
/// anything unknown.
pub trait Catalog {
    fn list_scripts(&self) -> &[Script];
    fn list_stories(&self) -> &[Story];
    fn list_locations(&self) -> &[MapLocation];

    fn get_script_by_id(&self, id: &str) -> Option<&Script> {
        self.list_scripts().iter().find(|s| s.id == id)
    }

    fn get_story_by_id(&self, id: &str) -> Option<&Story> {
        self.list_stories().iter().find(|s| s.id == id)
    }

    fn scripts_by_region(&self, region: &str) -> Vec<&Script> {
        let needle = region.to_lowercase();
        self.list_scripts()
            .iter()
            .filter(|s| s.region.to_lowercase().contains(&needle))
            .collect()
    }

    fn scripts_by_category(&self, category: ScriptCategory) -> Vec<&Script> {
        self.list_scripts()
            .iter()
            .filter(|s| s.category == category)
            .collect()
    }

    fn stories_for_script(&self, script_id: &str) -> Vec<&Story> {
        self.list_stories()
            .iter()
            .filter(|s| s.aksara == script_id)
            .collect()
    }

    fn locations_for_script(&self, script_id: &str) -> Vec<&MapLocation> {
        self.list_locations()
            .iter()
            .filter(|l| l.aksara.iter().any(|a| a == script_id))
            .collect()
    }
}

/// Catalog compiled into the binary from the JSON tables next to this file
#[derive(Debug, Clone)]
pub struct EmbeddedCatalog {
    scripts: Vec<Script>,
    stories: Vec<Story>,
    locations: Vec<MapLocation>,
}

impl EmbeddedCatalog {
    pub fn load() -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            scripts: read_table("scripts.json")?,
            stories: read_table("stories.json")?,
            locations: read_table("locations.json")?,
        })
    }
}

impl Catalog for EmbeddedCatalog {
    fn list_scripts(&self) -> &[Script] {
        &self.scripts
    }

    fn list_stories(&self) -> &[Story] {
        &self.stories
    }

    fn list_locations(&self) -> &[MapLocation] {
        &self.locations
    }
}

fn read_table<T: DeserializeOwned>(file_name: &str) -> Result<Vec<T>, Box<dyn Error>> {
    let file = CATALOG_DIR
        .get_file(file_name)
        .ok_or_else(|| format!("catalog table {file_name} not found"))?;

    let file_as_str = file
        .contents_utf8()
        .ok_or_else(|| format!("catalog table {file_name} is not utf-8"))?;

    Ok(serde_json::from_str(file_as_str)?)
}
