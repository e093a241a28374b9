use chrono::{DateTime, Utc};
use engine::types::draw_types::Draw;
use serde::{Deserialize, Serialize};

use crate::types::coupon_types::CouponView;
use crate::types::user_types::UserView;

pub const DEFAULT_PER_PAGE: usize = 10;
pub const MAX_PER_PAGE: usize = 100;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Query string accepted by every listing endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub sort: Option<String>,
    #[serde(default)]
    pub direction: SortDirection,
    pub q: Option<String>,
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortKey {
    Number(u64),
    Text(String),
    Time(DateTime<Utc>),
    Numbers(Vec<u8>),
}

pub trait Listable {
    /// Unknown columns sort by id.
    fn sort_key(&self, column: &str) -> SortKey;
    fn search_text(&self) -> String;
}

#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub per_page: usize,
}

/// Filters, sorts and slices rows the way the admin tables do.
pub fn paginate<T: Listable>(mut rows: Vec<T>, query: &ListQuery) -> Page<T> {
    if let Some(needle) = query
        .q
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(str::to_lowercase)
    {
        rows.retain(|row| row.search_text().to_lowercase().contains(&needle));
    }

    let column = query.sort.as_deref().unwrap_or("id");
    rows.sort_by_cached_key(|row| row.sort_key(column));
    if query.direction == SortDirection::Desc {
        rows.reverse();
    }

    let total = rows.len();
    let page = query.page.unwrap_or(0);
    let per_page = query
        .per_page
        .unwrap_or(DEFAULT_PER_PAGE)
        .clamp(1, MAX_PER_PAGE);

    let data = rows
        .into_iter()
        .skip(page.saturating_mul(per_page))
        .take(per_page)
        .collect();

    Page {
        data,
        total,
        page,
        per_page,
    }
}

impl Listable for Draw {
    fn sort_key(&self, column: &str) -> SortKey {
        match column {
            "draw_date" => SortKey::Time(self.draw_date),
            // pending draws have no numbers and sort first
            "winning_numbers" => SortKey::Numbers(
                self.winning_numbers
                    .as_ref()
                    .map(|n| n.to_vec())
                    .unwrap_or_default(),
            ),
            _ => SortKey::Number(self.id),
        }
    }

    fn search_text(&self) -> String {
        let winning = self
            .winning_numbers
            .as_ref()
            .map(|n| n.to_string())
            .unwrap_or_default();
        format!(
            "{} {} {}",
            self.id,
            self.draw_date.format("%Y-%m-%d %H:%M"),
            winning
        )
    }
}

impl Listable for UserView {
    fn sort_key(&self, column: &str) -> SortKey {
        match column {
            "name" => SortKey::Text(self.name.to_lowercase()),
            "email" => SortKey::Text(self.email.to_lowercase()),
            "created_at" => SortKey::Time(self.created_at),
            _ => SortKey::Number(self.id),
        }
    }

    fn search_text(&self) -> String {
        format!("{} {} {} {}", self.id, self.name, self.email, self.role)
    }
}

impl Listable for CouponView {
    fn sort_key(&self, column: &str) -> SortKey {
        match column {
            "user" => SortKey::Text(
                self.user
                    .as_ref()
                    .map(|u| u.name.to_lowercase())
                    .unwrap_or_default(),
            ),
            "created_at" => SortKey::Time(self.created_at),
            _ => SortKey::Number(self.id),
        }
    }

    fn search_text(&self) -> String {
        let owner = self
            .user
            .as_ref()
            .map(|u| format!("{} {}", u.name, u.email))
            .unwrap_or_default();
        let numbers = self
            .numbers
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        format!("{} {} {}", self.id, owner, numbers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use engine::validate_numbers;

    fn draw(id: u64, day: u32, winning: Option<[i64; 6]>) -> Draw {
        Draw {
            id,
            draw_date: Utc.with_ymd_and_hms(2024, 3, day, 21, 40, 0).unwrap(),
            winning_numbers: winning.map(|w| validate_numbers(&w).unwrap()),
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(),
        }
    }

    fn draws() -> Vec<Draw> {
        vec![
            draw(1, 15, Some([1, 2, 3, 4, 5, 6])),
            draw(2, 5, None),
            draw(3, 10, Some([7, 8, 9, 10, 11, 12])),
        ]
    }

    fn ids(page: &Page<Draw>) -> Vec<u64> {
        page.data.iter().map(|d| d.id).collect()
    }

    #[test]
    fn defaults_to_id_ascending() {
        let page = paginate(draws(), &ListQuery::default());
        assert_eq!(ids(&page), vec![1, 2, 3]);
        assert_eq!(page.total, 3);
        assert_eq!(page.per_page, DEFAULT_PER_PAGE);
    }

    #[test]
    fn sorts_by_column_and_direction() {
        let query = ListQuery {
            sort: Some("draw_date".into()),
            direction: SortDirection::Desc,
            ..Default::default()
        };
        assert_eq!(ids(&paginate(draws(), &query)), vec![1, 3, 2]);

        let unknown = ListQuery {
            sort: Some("nonsense".into()),
            direction: SortDirection::Desc,
            ..Default::default()
        };
        assert_eq!(ids(&paginate(draws(), &unknown)), vec![3, 2, 1]);
    }

    #[test]
    fn filter_counts_before_paging() {
        let query = ListQuery {
            q: Some("  2024-03-1 ".into()),
            per_page: Some(1),
            page: Some(1),
            ..Default::default()
        };
        let page = paginate(draws(), &query);
        assert_eq!(page.total, 2);
        assert_eq!(ids(&page), vec![3]);
    }

    #[test]
    fn filter_matches_winning_numbers() {
        let query = ListQuery {
            q: Some("7, 8".into()),
            ..Default::default()
        };
        assert_eq!(ids(&paginate(draws(), &query)), vec![3]);
    }

    #[test]
    fn per_page_is_clamped_and_pages_past_the_end_are_empty() {
        let query = ListQuery {
            per_page: Some(0),
            page: Some(50),
            ..Default::default()
        };
        let page = paginate(draws(), &query);
        assert_eq!(page.per_page, 1);
        assert!(page.data.is_empty());
        assert_eq!(page.total, 3);
    }

    #[test]
    fn winning_numbers_sort_numerically() {
        let rows = vec![
            draw(1, 1, Some([10, 11, 12, 13, 14, 15])),
            draw(2, 2, Some([2, 3, 4, 5, 6, 7])),
            draw(3, 3, None),
            draw(4, 4, Some([2, 3, 4, 5, 6, 30])),
        ];
        let query = ListQuery {
            sort: Some("winning_numbers".into()),
            ..Default::default()
        };
        assert_eq!(ids(&paginate(rows, &query)), vec![3, 2, 4, 1]);
    }
}
