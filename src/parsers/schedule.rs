use crate::dom::{own_text, root, sel, text_all};
use crate::helpers::extract_entity_slug;
use crate::models::{AnimeRef, ScheduleDay};
use scraper::Html;

/// Day names used when a schedule section has no heading
const DAYS: [&str; 7] = ["Senin", "Selasa", "Rabu", "Kamis", "Jumat", "Sabtu", "Minggu"];

/// Weekly release schedule; days without any anime are left out
pub fn parse_schedule(document: &Html) -> Vec<ScheduleDay> {
    let day_selector = sel(".kglist321");
    let link_selector = sel("ul li a");

    let mut schedule = Vec::new();
    for (index, section) in root(document).select(&day_selector).enumerate() {
        let mut day = text_all(section, "h2");
        if day.is_empty() {
            day = DAYS
                .get(index)
                .map(|d| d.to_string())
                .unwrap_or_else(|| format!("Day {}", index + 1));
        }

        let anime: Vec<AnimeRef> = section
            .select(&link_selector)
            .filter_map(|a| {
                let title = own_text(a);
                let href = a.value().attr("href").unwrap_or_default();
                if title.is_empty() || href.is_empty() {
                    return None;
                }
                Some(AnimeRef {
                    title,
                    slug: extract_entity_slug(href),
                })
            })
            .collect();

        if !anime.is_empty() {
            schedule.push(ScheduleDay { day, anime });
        }
    }

    log::debug!("Schedule: {} days", schedule.len());
    schedule
}
