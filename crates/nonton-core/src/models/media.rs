use serde::{Deserialize, Serialize};

/// One quality variant of an episode's video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamOption {
    pub resolution: String,
    pub url: String,
    pub provider: String,
}

/// One page of a chapter, zero-based.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImagePage {
    pub url: String,
    pub index: usize,
}

/// Pages of a single chapter, in reading order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChapterImages {
    pub chapter_id: String,
    pub images: Vec<ImagePage>,
}

impl ChapterImages {
    pub fn from_urls(chapter_id: impl Into<String>, urls: impl IntoIterator<Item = String>) -> Self {
        let images = urls
            .into_iter()
            .filter(|u| !u.trim().is_empty())
            .enumerate()
            .map(|(index, url)| ImagePage { url, index })
            .collect();
        Self {
            chapter_id: chapter_id.into(),
            images,
        }
    }
}

/// Pick the stream with exactly `label`, else the first one.
pub fn select_stream<'a>(options: &'a [StreamOption], label: &str) -> Option<&'a StreamOption> {
    options
        .iter()
        .find(|o| o.resolution == label)
        .or_else(|| options.first())
}

/// Distinct resolution labels, highest first. Labels without a number sort last.
pub fn available_resolutions(options: &[StreamOption]) -> Vec<String> {
    let mut labels: Vec<String> = Vec::new();
    for o in options {
        if !labels.contains(&o.resolution) {
            labels.push(o.resolution.clone());
        }
    }
    labels.sort_by_key(|l| std::cmp::Reverse(resolution_rank(l)));
    labels
}

fn resolution_rank(label: &str) -> i64 {
    let digits: String = label.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().unwrap_or(-1)
}
