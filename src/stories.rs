use crate::catalog::{Catalog, Difficulty, Story, StoryCategory};

/// Cycles `None -> all[0] -> .. -> all[n-1] -> None`
fn cycle<T: Copy + PartialEq>(current: Option<T>, all: &[T]) -> Option<T> {
    match current {
        None => all.first().copied(),
        Some(c) => all
            .iter()
            .position(|x| *x == c)
            .and_then(|i| all.get(i + 1))
            .copied(),
    }
}

/// Filter, selection and reading state of the story list
#[derive(Debug, Clone)]
pub struct StoryBrowser {
    category: Option<StoryCategory>,
    difficulty: Option<Difficulty>,
    selected: usize,
    open: bool,
    show_original: bool,
    show_transliteration: bool,
}

impl Default for StoryBrowser {
    fn default() -> Self {
        Self {
            category: None,
            difficulty: None,
            selected: 0,
            open: false,
            show_original: true,
            show_transliteration: false,
        }
    }
}

impl StoryBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(&self) -> Option<StoryCategory> {
        self.category
    }

    pub fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }

    pub fn cycle_category(&mut self) {
        self.category = cycle(self.category, &StoryCategory::ALL);
        self.selected = 0;
    }

    pub fn cycle_difficulty(&mut self) {
        self.difficulty = cycle(self.difficulty, &Difficulty::ALL);
        self.selected = 0;
    }

    /// Stories passing both filters, in catalog order
    pub fn visible<'c, C: Catalog + ?Sized>(&self, catalog: &'c C) -> Vec<&'c Story> {
        catalog
            .list_stories()
            .iter()
            .filter(|s| self.category.map_or(true, |c| s.category == c))
            .filter(|s| self.difficulty.map_or(true, |d| s.difficulty == d))
            .collect()
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_story<'c, C: Catalog + ?Sized>(&self, catalog: &'c C) -> Option<&'c Story> {
        self.visible(catalog).get(self.selected).copied()
    }

    pub fn select_next<C: Catalog + ?Sized>(&mut self, catalog: &C) {
        let n = self.visible(catalog).len();
        if n > 0 {
            self.selected = (self.selected + 1) % n;
        }
    }

    pub fn select_previous<C: Catalog + ?Sized>(&mut self, catalog: &C) {
        let n = self.visible(catalog).len();
        if n > 0 {
            self.selected = (self.selected + n - 1) % n;
        }
    }

    /// Opens the selected story for reading. False when the list is empty.
    pub fn open<C: Catalog + ?Sized>(&mut self, catalog: &C) -> bool {
        match self.selected_story(catalog) {
            Some(story) => {
                log::debug!("reading story {}", story.id);
                self.open = true;
                true
            }
            None => false,
        }
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn show_original(&self) -> bool {
        self.show_original
    }

    pub fn show_transliteration(&self) -> bool {
        self.show_transliteration
    }

    pub fn toggle_original(&mut self) {
        self.show_original = !self.show_original;
    }

    pub fn toggle_transliteration(&mut self) {
        self.show_transliteration = !self.show_transliteration;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::EmbeddedCatalog;

    fn ids(browser: &StoryBrowser, catalog: &EmbeddedCatalog) -> Vec<String> {
        browser
            .visible(catalog)
            .iter()
            .map(|s| s.id.clone())
            .collect()
    }

    #[test]
    fn test_unfiltered_lists_everything() {
        let catalog = EmbeddedCatalog::load().unwrap();
        let browser = StoryBrowser::new();
        assert_eq!(browser.visible(&catalog).len(), catalog.list_stories().len());
        assert_eq!(browser.selected_story(&catalog).unwrap().id, "malin-kundang");
    }

    #[test]
    fn test_filters_combine() {
        let catalog = EmbeddedCatalog::load().unwrap();
        let mut browser = StoryBrowser::new();

        browser.cycle_category();
        assert_eq!(browser.category(), Some(StoryCategory::Folklore));
        assert_eq!(ids(&browser, &catalog), ["malin-kundang", "ni-diah-tantri"]);

        browser.cycle_difficulty();
        browser.cycle_difficulty();
        assert_eq!(browser.difficulty(), Some(Difficulty::Intermediate));
        assert_eq!(ids(&browser, &catalog), ["ni-diah-tantri"]);

        browser.cycle_category();
        assert_eq!(browser.category(), Some(StoryCategory::Legend));
        assert_eq!(ids(&browser, &catalog), ["sangkuriang"]);
    }

    #[test]
    fn test_category_cycle_returns_to_all() {
        let mut browser = StoryBrowser::new();
        for _ in 0..StoryCategory::ALL.len() {
            browser.cycle_category();
        }
        assert_eq!(browser.category(), Some(StoryCategory::Historical));
        browser.cycle_category();
        assert_eq!(browser.category(), None);
    }

    #[test]
    fn test_empty_filter_cannot_open() {
        let catalog = EmbeddedCatalog::load().unwrap();
        let mut browser = StoryBrowser::new();
        for _ in 0..4 {
            browser.cycle_category();
        }
        assert_eq!(browser.category(), Some(StoryCategory::Historical));
        assert!(browser.visible(&catalog).is_empty());
        assert!(!browser.open(&catalog));
        assert!(!browser.is_open());

        browser.select_next(&catalog);
        assert_eq!(browser.selected_index(), 0);
    }

    #[test]
    fn test_selection_wraps_and_filter_resets_it() {
        let catalog = EmbeddedCatalog::load().unwrap();
        let mut browser = StoryBrowser::new();

        browser.select_previous(&catalog);
        assert_eq!(browser.selected_index(), catalog.list_stories().len() - 1);
        browser.select_next(&catalog);
        assert_eq!(browser.selected_index(), 0);

        browser.select_next(&catalog);
        browser.cycle_difficulty();
        assert_eq!(browser.selected_index(), 0);
    }

    #[test]
    fn test_open_and_text_toggles() {
        let catalog = EmbeddedCatalog::load().unwrap();
        let mut browser = StoryBrowser::new();
        browser.select_next(&catalog);

        assert!(browser.open(&catalog));
        assert_eq!(browser.selected_story(&catalog).unwrap().id, "sangkuriang");
        assert!(browser.show_original());
        assert!(!browser.show_transliteration());

        browser.toggle_original();
        browser.toggle_transliteration();
        assert!(!browser.show_original());
        assert!(browser.show_transliteration());

        browser.close();
        assert!(!browser.is_open());
    }
}
