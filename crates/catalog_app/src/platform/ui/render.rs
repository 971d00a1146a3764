use std::fmt::Write;

use catalog_core::{
    AggregateStats, CatalogViewModel, ComicCardView, DetailViewModel, FilterState, LoadStatus,
    StatusCategory, StatusFilter,
};
use catalog_engine::ApiEndpoints;
use chrono::NaiveDateTime;

const TITLE: &str = "漫畫補給站";

pub fn render_catalog(view: &CatalogViewModel, endpoints: &ApiEndpoints) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{TITLE} | {}", describe_filter(&view.filter));
    out.push_str(&render_stats(&view.stats, &view.filter));

    match &view.load {
        LoadStatus::Idle | LoadStatus::Loading if view.stats.total == 0 => {
            out.push_str("Loading catalog...\n");
            return out;
        }
        LoadStatus::Failed(message) => {
            let _ = writeln!(out, "Catalog unavailable: {message}");
            if view.stats.total == 0 {
                out.push_str("Type 'reload' to try again.\n");
                return out;
            }
        }
        _ => {}
    }

    if view.show_clear_filters {
        out.push_str("沒有找到符合條件的漫畫. Type 'clear' to reset all filters.\n");
        return out;
    }

    let _ = writeln!(
        out,
        "{} matching comics",
        format_with_commas(view.filtered_count as u64)
    );
    for card in &view.cards {
        out.push_str(&format_card(card, endpoints));
    }

    if view.show_pagination {
        let prev = if view.can_prev { "prev" } else { "----" };
        let next = if view.can_next { "next" } else { "----" };
        let _ = writeln!(
            out,
            "< {prev} | page {} / {} | {next} >",
            view.current_page, view.total_pages
        );
    }
    out
}

/// Filter cards with their counts; the active one is starred.
pub fn render_stats(stats: &AggregateStats, filter: &FilterState) -> String {
    let cards = [
        (StatusFilter::All, "全部漫畫", stats.total),
        (
            StatusFilter::Only(StatusCategory::FreeCompleted),
            "免費完結",
            stats.free_completed,
        ),
        (StatusFilter::Only(StatusCategory::Paid), "需追漫券", stats.paid),
        (
            StatusFilter::Only(StatusCategory::FreeOngoing),
            "連載中",
            stats.free_ongoing,
        ),
    ];
    let mut out = String::new();
    for (status, label, count) in cards {
        let marker = if filter.status_filter == status { '*' } else { ' ' };
        let _ = write!(
            out,
            "{marker}{label} {} ({status})  ",
            format_with_commas(count as u64)
        );
    }
    let trimmed = out.trim_end().len();
    out.truncate(trimmed);
    out.push('\n');
    out
}

pub fn render_detail(view: &DetailViewModel, endpoints: &ApiEndpoints) -> String {
    let detail = match view {
        DetailViewModel::Loading { id } => return format!("Loading comic {id}...\n"),
        DetailViewModel::NotFound { id } => return format!("找不到這部漫畫 (id {id})\n"),
        DetailViewModel::Found(detail) => detail,
    };

    let mut out = String::new();
    let _ = writeln!(
        out,
        "[{}] {} 更新",
        detail.status.detail_label(),
        format_crawl_date(&detail.crawl_date)
    );
    let _ = writeln!(out, "{}", detail.title);
    let _ = writeln!(out, "  Genre:    {}", detail.genre);
    let _ = writeln!(out, "  Author:   {}", detail.author);
    let _ = writeln!(out, "  Episodes: {}", detail.episodes);
    let _ = writeln!(out, "  Access:   {}", detail.access);
    let _ = writeln!(out, "  Read:     {}", detail.hyperlink);
    if !detail.picture.is_empty() {
        let _ = writeln!(out, "  Cover:    {}", endpoints.proxy_image_url(&detail.picture));
    }
    out
}

fn format_card(card: &ComicCardView, endpoints: &ApiEndpoints) -> String {
    let mut line = format!(
        "  #{:<8} [{}] {}",
        card.id.as_str(),
        card.status.badge_label(),
        card.title
    );
    for extra in [&card.genre, &card.episodes] {
        if !extra.is_empty() {
            let _ = write!(line, " | {extra}");
        }
    }
    line.push('\n');
    if !card.picture.is_empty() {
        let _ = writeln!(line, "            {}", endpoints.proxy_image_url(&card.picture));
    }
    line
}

fn describe_filter(filter: &FilterState) -> String {
    if filter.search_term.is_empty() {
        format!("status: {}", filter.status_filter)
    } else {
        format!(
            "search: \"{}\" | status: {}",
            filter.search_term, filter.status_filter
        )
    }
}

/// Date part of a crawl timestamp ("2025-01-31 08:15:00" -> "2025-01-31").
fn format_crawl_date(raw: &str) -> String {
    match NaiveDateTime::parse_from_str(raw.trim(), "%Y-%m-%d %H:%M:%S") {
        Ok(timestamp) => timestamp.date().format("%Y-%m-%d").to_string(),
        Err(_) => raw.split(' ').next().unwrap_or_default().to_string(),
    }
}

fn format_with_commas(value: u64) -> String {
    let mut out = String::new();
    for (i, ch) in value.to_string().chars().rev().enumerate() {
        if i != 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out.chars().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_core::{ComicDetailView, ComicId};

    fn endpoints() -> ApiEndpoints {
        ApiEndpoints::new("http://localhost:5000").unwrap()
    }

    fn card(id: &str, status: StatusCategory) -> ComicCardView {
        ComicCardView {
            id: ComicId::from(id),
            title: format!("Comic {id}"),
            genre: "奇幻".to_string(),
            episodes: "共 12 話".to_string(),
            picture: "https://img.example/c.jpg".to_string(),
            status,
        }
    }

    fn loaded_view() -> CatalogViewModel {
        CatalogViewModel {
            load: LoadStatus::Loaded,
            stats: AggregateStats {
                total: 1204,
                free_ongoing: 4,
                free_completed: 1000,
                paid: 200,
            },
            filtered_count: 1204,
            current_page: 1,
            total_pages: 13,
            show_pagination: true,
            can_prev: false,
            can_next: true,
            show_clear_filters: false,
            cards: vec![card("7", StatusCategory::Paid)],
            ..CatalogViewModel::default()
        }
    }

    #[test]
    fn catalog_lists_cards_with_proxy_images_and_pages() {
        let text = render_catalog(&loaded_view(), &endpoints());
        assert!(text.contains("*全部漫畫 1,204 (all)"));
        assert!(text.contains("需追漫券 200 (paid)"));
        assert!(text.contains("#7        [追漫券] Comic 7 | 奇幻 | 共 12 話"));
        assert!(text.contains(
            "http://localhost:5000/api/proxy-image?url=https%3A%2F%2Fimg.example%2Fc.jpg"
        ));
        assert!(text.contains("< ---- | page 1 / 13 | next >"));
    }

    #[test]
    fn empty_page_offers_to_clear_filters() {
        let view = CatalogViewModel {
            cards: Vec::new(),
            show_clear_filters: true,
            filter: FilterState::new("zzz", StatusFilter::All),
            ..loaded_view()
        };
        let text = render_catalog(&view, &endpoints());
        assert!(text.contains("search: \"zzz\""));
        assert!(text.contains("'clear'"));
        assert!(!text.contains("page 1 / 13"));
    }

    #[test]
    fn first_load_shows_loading() {
        let view = CatalogViewModel {
            load: LoadStatus::Loading,
            ..CatalogViewModel::default()
        };
        assert!(render_catalog(&view, &endpoints()).contains("Loading catalog"));
    }

    #[test]
    fn failed_first_load_offers_reload_only() {
        let view = CatalogViewModel {
            load: LoadStatus::Failed("connection refused".to_string()),
            last_error: Some("connection refused".to_string()),
            ..CatalogViewModel::default()
        };
        let text = render_catalog(&view, &endpoints());
        assert!(text.contains("Catalog unavailable: connection refused"));
        assert!(text.contains("'reload'"));
        assert!(!text.contains("'clear'"));
    }

    #[test]
    fn failed_reload_keeps_previous_cards() {
        let view = CatalogViewModel {
            load: LoadStatus::Failed("timeout".to_string()),
            ..loaded_view()
        };
        let text = render_catalog(&view, &endpoints());
        assert!(text.contains("Catalog unavailable: timeout"));
        assert!(text.contains("[追漫券] Comic 7"));
    }

    #[test]
    fn detail_shows_status_tag_and_date() {
        let view = DetailViewModel::Found(ComicDetailView {
            id: ComicId::from("7"),
            title: "Alpha".to_string(),
            author: "A".to_string(),
            genre: "奇幻".to_string(),
            episodes: "共 52 話".to_string(),
            access: "已完結，需要追漫券".to_string(),
            picture: String::new(),
            hyperlink: "https://www.webtoons.com/a".to_string(),
            crawl_date: "2025-01-31 08:15:00".to_string(),
            status: StatusCategory::Paid,
        });
        let text = render_detail(&view, &endpoints());
        assert!(text.starts_with("[需追漫券] 2025-01-31 更新\nAlpha\n"));
        assert!(text.contains("Read:     https://www.webtoons.com/a"));
        assert!(!text.contains("Cover"));
    }

    #[test]
    fn detail_not_found() {
        let view = DetailViewModel::NotFound {
            id: ComicId::from("999"),
        };
        assert_eq!(render_detail(&view, &endpoints()), "找不到這部漫畫 (id 999)\n");
    }

    #[test]
    fn crawl_date_falls_back_to_first_word() {
        assert_eq!(format_crawl_date("2025-01-31 08:15:00"), "2025-01-31");
        assert_eq!(format_crawl_date("yesterday evening"), "yesterday");
        assert_eq!(format_crawl_date(""), "");
    }

    #[test]
    fn commas_group_thousands() {
        assert_eq!(format_with_commas(0), "0");
        assert_eq!(format_with_commas(1234567), "1,234,567");
    }
}
