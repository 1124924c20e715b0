use camino::Utf8PathBuf;
use serde::Serialize;

use crate::domain::{Champion, ChampionId};
use crate::selector::Selection;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tile {
    pub id: ChampionId,
    pub name: String,
    pub icon: Utf8PathBuf,
    pub detail: DetailView,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailView {
    pub name: String,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
}

impl From<&Champion> for DetailView {
    fn from(champion: &Champion) -> Self {
        Self {
            name: champion.name.clone(),
            title: champion.title.clone(),
            description: champion.description.clone(),
            tags: champion.tags.clone(),
        }
    }
}

/// Row-major tile layout. A `None` slot is a champion without a cached icon
/// and is drawn as a gap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Grid {
    columns: usize,
    slots: Vec<Option<Tile>>,
}

impl Grid {
    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn rows(&self) -> usize {
        self.slots.len().div_ceil(self.columns)
    }

    pub fn slot(&self, row: usize, col: usize) -> Option<&Tile> {
        if col >= self.columns {
            return None;
        }
        self.slots.get(row * self.columns + col)?.as_ref()
    }

    pub fn slot_at(&self, index: usize) -> Option<&Tile> {
        self.slots.get(index)?.as_ref()
    }

    pub fn row(&self, row: usize) -> &[Option<Tile>] {
        let start = (row * self.columns).min(self.slots.len());
        let end = (start + self.columns).min(self.slots.len());
        &self.slots[start..end]
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.slots.iter().flatten()
    }

    pub fn position(&self, index: usize) -> (usize, usize) {
        (index / self.columns, index % self.columns)
    }
}

pub fn render<F>(selection: &Selection, columns: usize, icon_for: F) -> Grid
where
    F: Fn(&ChampionId) -> Option<Utf8PathBuf>,
{
    let columns = columns.max(1);
    let slots = selection
        .iter()
        .map(|champion| {
            icon_for(&champion.id).map(|icon| Tile {
                id: champion.id.clone(),
                name: champion.name.clone(),
                icon,
                detail: DetailView::from(champion),
            })
        })
        .collect();
    Grid { columns, slots }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::Roster;

    fn champion(id: &str) -> Champion {
        Champion {
            id: id.parse().unwrap(),
            name: format!("{id} name"),
            title: format!("the {id}"),
            description: format!("{id} lore"),
            tags: vec!["Mage".to_string()],
        }
    }

    fn roster(count: usize) -> Roster {
        Roster::from_champions((0..count).map(|i| champion(&format!("C{i:02}"))))
    }

    #[test]
    fn wraps_rows_at_column_count() {
        let selection = Selection::all(&roster(23));
        let grid = render(&selection, 10, |id| Some(Utf8PathBuf::from(format!("{id}.png"))));

        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.row(0).len(), 10);
        assert_eq!(grid.row(2).len(), 3);
        assert_eq!(grid.slot(1, 0).unwrap().id.as_str(), "C10");
        assert_eq!(grid.slot(2, 2).unwrap().id.as_str(), "C22");
        assert!(grid.slot(2, 3).is_none());
        assert!(grid.slot(0, 10).is_none());
        assert_eq!(grid.position(22), (2, 2));
    }

    #[test]
    fn missing_icon_leaves_gap() {
        let selection = Selection::all(&roster(3));
        let grid = render(&selection, 10, |id| {
            (id.as_str() != "C01").then(|| Utf8PathBuf::from(format!("{id}.png")))
        });

        assert_eq!(grid.len(), 3);
        assert!(grid.slot(0, 1).is_none());
        assert_eq!(grid.slot(0, 2).unwrap().id.as_str(), "C02");
        assert_eq!(grid.tiles().count(), 2);
    }

    #[test]
    fn tile_carries_detail() {
        let selection = Selection::all(&roster(1));
        let grid = render(&selection, 10, |_| Some(Utf8PathBuf::from("x.png")));
        let detail = &grid.slot_at(0).unwrap().detail;
        assert_eq!(detail.title, "the C00");
        assert_eq!(detail.description, "C00 lore");
        assert_eq!(detail.tags, vec!["Mage".to_string()]);
    }

    #[test]
    fn empty_selection_has_no_rows() {
        let grid = render(&Selection::default(), 10, |_| None);
        assert!(grid.is_empty());
        assert_eq!(grid.rows(), 0);
        assert!(grid.row(0).is_empty());
    }
}
