/// Hero image chosen once per session and kept across in-app navigation.
/// Owned by whoever owns the session; a reload starts a new one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeroSelection {
    selected: Option<String>,
}

impl HeroSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// `pick` receives the candidate count and returns an index; it is only
    /// called when nothing has been selected yet.
    pub fn pick<F>(&mut self, candidates: &[String], pick: F) -> Option<&str>
    where
        F: FnOnce(usize) -> usize,
    {
        if self.selected.is_none() && !candidates.is_empty() {
            let index = pick(candidates.len()).min(candidates.len() - 1);
            self.selected = Some(candidates[index].clone());
        }
        self.selected.as_deref()
    }
}
