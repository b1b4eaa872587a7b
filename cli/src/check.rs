use std::fmt;

use stickerboard_core::{Item, LayoutMap, Position};

/// Problems found in a layout document compared with a folder's items.
#[derive(Debug, Default, PartialEq)]
pub struct CheckReport {
    /// Ids in the document with no matching item; they are ignored at runtime.
    pub unknown: Vec<String>,
    /// Items the document does not place; they fall back to defaults.
    pub missing: Vec<String>,
    pub out_of_range: Vec<(String, Position)>,
}

impl CheckReport {
    pub fn is_clean(&self) -> bool {
        self.unknown.is_empty() && self.out_of_range.is_empty()
    }
}

pub fn check_layout(items: &[Item], document: &LayoutMap, y_max: f32) -> CheckReport {
    let mut report = CheckReport::default();
    for (id, position) in document {
        if !items.iter().any(|item| &item.id == id) {
            report.unknown.push(id.clone());
            continue;
        }
        let x_ok = (0.0..=100.0).contains(&position.x);
        let y_ok = (0.0..=y_max).contains(&position.y);
        if !x_ok || !y_ok {
            report.out_of_range.push((id.clone(), *position));
        }
    }
    report.missing = items
        .iter()
        .filter(|item| !document.contains_key(&item.id))
        .map(|item| item.id.clone())
        .collect();
    report
}

impl fmt::Display for CheckReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for id in &self.unknown {
            writeln!(f, "unknown id: {id}")?;
        }
        for (id, position) in &self.out_of_range {
            writeln!(
                f,
                "out of range: {id} at ({:.2}, {:.2})",
                position.x, position.y
            )?;
        }
        for id in &self.missing {
            writeln!(f, "default position: {id}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items() -> Vec<Item> {
        vec![Item::new("a"), Item::new("b"), Item::new("c")]
    }

    #[test]
    fn reports_unknown_missing_and_out_of_range() {
        let mut document = LayoutMap::new();
        document.insert("a".to_string(), Position::new(50.0, 50.0, 0.0));
        document.insert("b".to_string(), Position::new(50.0, 150.0, 0.0));
        document.insert("ghost".to_string(), Position::new(10.0, 10.0, 0.0));

        let report = check_layout(&items(), &document, 100.0);
        assert_eq!(report.unknown, vec!["ghost".to_string()]);
        assert_eq!(report.missing, vec!["c".to_string()]);
        assert_eq!(report.out_of_range.len(), 1);
        assert_eq!(report.out_of_range[0].0, "b");
        assert!(!report.is_clean());
    }

    #[test]
    fn edit_mode_range_accepts_tall_layouts() {
        let mut document = LayoutMap::new();
        document.insert("b".to_string(), Position::new(50.0, 150.0, 0.0));
        let report = check_layout(&items(), &document, 200.0);
        assert!(report.is_clean());
        assert_eq!(report.missing.len(), 2);
    }
}
