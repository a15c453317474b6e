//! The rule battery
//!
//! Each rule looks at one aspect of the page and returns at most one
//! finding. Rules do not depend on each other.

use crate::extract::{missing_alt_count, Page};
use crate::probe::SiteChecks;
use crate::suggest::finding::{Finding, Priority};
use std::time::Duration;

/// Title length bounds, in characters
pub const TITLE_MIN_CHARS: usize = 30;
pub const TITLE_MAX_CHARS: usize = 60;

/// Meta description length bounds, in characters
pub const DESCRIPTION_MIN_CHARS: usize = 120;
pub const DESCRIPTION_MAX_CHARS: usize = 160;

/// Pages with fewer words are considered thin
pub const MIN_WORD_COUNT: usize = 300;

/// Fetches slower than this are reported
pub const SLOW_LOAD: Duration = Duration::from_secs(3);

pub type Rule = fn(&Page, &SiteChecks) -> Option<Finding>;

/// Rules in evaluation order
pub const RULES: &[Rule] = &[
    title_missing,
    title_length,
    description_missing,
    description_length,
    h1_missing,
    h1_duplicated,
    images_missing_alt,
    content_too_short,
    broken_links,
    no_internal_links,
    viewport_missing,
    not_secure,
    slow_load,
];

/// Present and non-blank text, with its length in characters
fn non_empty(value: Option<&str>) -> Option<usize> {
    value
        .filter(|v| !v.trim().is_empty())
        .map(|v| v.chars().count())
}

fn title_missing(page: &Page, _: &SiteChecks) -> Option<Finding> {
    if non_empty(page.title()).is_some() {
        return None;
    }
    Some(Finding::new(
        Priority::Critical,
        "Missing title",
        "The page has no title. The title is one of the most important on-page signals.",
        "Write a unique, descriptive title of 50-60 characters.",
    ))
}

fn title_length(page: &Page, _: &SiteChecks) -> Option<Finding> {
    let len = non_empty(page.title())?;
    if len < TITLE_MIN_CHARS {
        Some(Finding::new(
            Priority::Important,
            "Title too short",
            format!("Your title is {} characters long.", len),
            "Lengthen the title so it describes the page better (50-60 characters).",
        ))
    } else if len > TITLE_MAX_CHARS {
        Some(Finding::new(
            Priority::Moderate,
            "Title too long",
            format!("Your title is {} characters long.", len),
            "Shorten the title to 50-60 characters so it is not truncated in SERPs.",
        ))
    } else {
        None
    }
}

fn description_missing(page: &Page, _: &SiteChecks) -> Option<Finding> {
    if non_empty(page.meta_description()).is_some() {
        return None;
    }
    Some(Finding::new(
        Priority::Critical,
        "Missing meta description",
        "No meta description is defined.",
        "Add a meta description of 150-160 characters that summarizes the page.",
    ))
}

fn description_length(page: &Page, _: &SiteChecks) -> Option<Finding> {
    let len = non_empty(page.meta_description())?;
    if len < DESCRIPTION_MIN_CHARS {
        Some(Finding::new(
            Priority::Important,
            "Meta description too short",
            format!("Your meta description is {} characters long.", len),
            "Lengthen the meta description to 150-160 characters.",
        ))
    } else if len > DESCRIPTION_MAX_CHARS {
        Some(Finding::new(
            Priority::Moderate,
            "Meta description too long",
            format!("Your meta description is {} characters long.", len),
            "Shorten the meta description to 150-160 characters.",
        ))
    } else {
        None
    }
}

fn h1_missing(page: &Page, _: &SiteChecks) -> Option<Finding> {
    if page.headings().count(1) > 0 {
        return None;
    }
    Some(Finding::new(
        Priority::Critical,
        "Missing H1 heading",
        "The page has no H1 tag.",
        "Add a single H1 tag that describes the main content of the page.",
    ))
}

fn h1_duplicated(page: &Page, _: &SiteChecks) -> Option<Finding> {
    let count = page.headings().count(1);
    if count <= 1 {
        return None;
    }
    Some(Finding::new(
        Priority::Important,
        "Multiple H1 headings",
        format!("There are {} H1 tags on the page.", count),
        "Keep exactly one H1 tag per page for a clear heading structure.",
    ))
}

fn images_missing_alt(page: &Page, _: &SiteChecks) -> Option<Finding> {
    let images = page.images();
    let missing = missing_alt_count(images);
    if missing == 0 {
        return None;
    }
    Some(Finding::new(
        Priority::Important,
        "Images without alt text",
        format!(
            "{} of {} image(s) have no alternative text.",
            missing,
            images.len()
        ),
        "Add descriptive alt attributes to every meaningful image.",
    ))
}

fn content_too_short(page: &Page, _: &SiteChecks) -> Option<Finding> {
    let words = page.word_count();
    if words >= MIN_WORD_COUNT {
        return None;
    }
    Some(Finding::new(
        Priority::Important,
        "Thin content",
        format!("The page contains only {} words.", words),
        "Add more relevant content. Aim for at least 300 words on main pages.",
    ))
}

fn broken_links(page: &Page, _: &SiteChecks) -> Option<Finding> {
    let broken = page.links().broken.len();
    if broken == 0 {
        return None;
    }
    Some(Finding::new(
        Priority::Critical,
        "Broken links",
        format!("{} link(s) have an href that cannot be resolved.", broken),
        "Fix or remove the malformed links.",
    ))
}

fn no_internal_links(page: &Page, _: &SiteChecks) -> Option<Finding> {
    if !page.links().internal.is_empty() {
        return None;
    }
    Some(Finding::new(
        Priority::Important,
        "No internal links",
        "No links to other pages of this site were found.",
        "Link to related pages of the site to help navigation and indexing.",
    ))
}

fn viewport_missing(page: &Page, _: &SiteChecks) -> Option<Finding> {
    if page.mobile_info().viewport_present {
        return None;
    }
    Some(Finding::new(
        Priority::Critical,
        "Missing viewport meta tag",
        "The page has no viewport meta tag.",
        "Add <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\"> for mobile devices.",
    ))
}

fn not_secure(_: &Page, checks: &SiteChecks) -> Option<Finding> {
    if checks.ssl.secure {
        return None;
    }
    let problem = match &checks.ssl.error {
        Some(reason) => format!("The site does not serve valid HTTPS ({}).", reason),
        None => "The site does not serve valid HTTPS.".to_string(),
    };
    Some(Finding::new(
        Priority::Critical,
        "HTTPS not enabled",
        problem,
        "Serve the site over HTTPS with a valid certificate.",
    ))
}

fn slow_load(page: &Page, _: &SiteChecks) -> Option<Finding> {
    let load_time = page.load_time();
    if load_time <= SLOW_LOAD {
        return None;
    }
    Some(Finding::new(
        Priority::Important,
        "Slow page load",
        format!("The page took {:.2} seconds to load.", load_time.as_secs_f64()),
        "Optimize images, minify CSS and JavaScript, and consider a CDN.",
    ))
}
