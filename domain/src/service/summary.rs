use crate::SummaryDocument;

const SUMMARY_HEADING: &str = "Summary";
const TRENDY_HEADING: &str = "Trendy Content";
const KEY_MOMENTS_HEADING: &str = "Key Moments";

/// Splits generated free text into its three sections by
/// heading-anchored search. A heading is the literal `##` marker,
/// optional whitespace, then the exact case-sensitive section name.
/// Absent or misspelled headings degrade to empty sections; this never
/// fails, and re-extraction of the same text is byte-identical.
pub fn extract(raw_text: &str) -> SummaryDocument {
    let trendy_heading = find_heading(raw_text, TRENDY_HEADING);

    let overview_end = trendy_heading
        .map(|heading| heading.marker_start)
        .unwrap_or(raw_text.len());
    let overview = strip_summary_heading(&raw_text[..overview_end])
        .trim()
        .to_string();

    let trendy = match trendy_heading {
        Some(heading) => {
            let body = &raw_text[heading.body_start..];
            let end = find_heading(body, KEY_MOMENTS_HEADING)
                .map(|next| next.marker_start)
                .unwrap_or(body.len());
            body[..end].trim().to_string()
        }
        None => String::new(),
    };

    let key_moments = match find_heading(raw_text, KEY_MOMENTS_HEADING) {
        Some(heading) => raw_text[heading.body_start..].trim().to_string(),
        None => String::new(),
    };

    SummaryDocument {
        raw_text: raw_text.to_string(),
        overview,
        trendy,
        key_moments,
    }
}

#[derive(Clone, Copy)]
struct HeadingMatch {
    /// Byte offset of the `##` marker.
    marker_start: usize,
    /// Byte offset just past the section name.
    body_start: usize,
}

fn find_heading(text: &str, name: &str) -> Option<HeadingMatch> {
    let mut from = 0;
    while let Some(offset) = text[from..].find("##") {
        let marker_start = from + offset;
        let after_marker = &text[marker_start + 2..];
        let name_offset = after_marker.len() - after_marker.trim_start().len();
        if after_marker[name_offset..].starts_with(name) {
            return Some(HeadingMatch {
                marker_start,
                body_start: marker_start + 2 + name_offset + name.len(),
            });
        }
        // Step one byte so runs of `#` still expose every marker.
        from = marker_start + 1;
    }
    None
}

/// The overview may open with its own `## Summary` heading; drop the
/// marker so the section body stands alone.
fn strip_summary_heading(region: &str) -> &str {
    if let Some(heading) = find_heading(region, SUMMARY_HEADING) {
        if region[..heading.marker_start].trim().is_empty() {
            return &region[heading.body_start..];
        }
    }
    region
}

#[cfg(test)]
mod tests {
    use super::extract;

    const WELL_FORMED: &str = "## Summary\nX\n## Trendy Content\nY\n## Key Moments\nZ";

    #[test]
    fn splits_well_formed_text_into_sections() {
        let document = extract(WELL_FORMED);
        assert_eq!(document.overview, "X");
        assert_eq!(document.trendy, "Y");
        assert_eq!(document.key_moments, "Z");
        assert_eq!(document.raw_text, WELL_FORMED);
    }

    #[test]
    fn summary_only_text_leaves_other_sections_empty() {
        let document = extract("## Summary\nJust an overview.");
        assert_eq!(document.overview, "Just an overview.");
        assert_eq!(document.trendy, "");
        assert_eq!(document.key_moments, "");
    }

    #[test]
    fn unlabeled_preamble_is_the_overview() {
        let document = extract("Plain text with no headings at all.");
        assert_eq!(document.overview, "Plain text with no headings at all.");
        assert_eq!(document.trendy, "");
        assert_eq!(document.key_moments, "");
    }

    #[test]
    fn missing_key_moments_runs_trendy_to_end() {
        let document = extract("intro\n## Trendy Content\nclip one\nclip two");
        assert_eq!(document.overview, "intro");
        assert_eq!(document.trendy, "clip one\nclip two");
        assert_eq!(document.key_moments, "");
    }

    #[test]
    fn heading_match_is_case_sensitive() {
        let document = extract("intro\n## trendy content\nbody");
        assert_eq!(document.trendy, "");
        // The unrecognized heading stays part of the overview.
        assert_eq!(document.overview, "intro\n## trendy content\nbody");
    }

    #[test]
    fn whitespace_between_marker_and_name_is_tolerated() {
        let document = extract("##Summary\nX\n##   Trendy Content\nY\n##\tKey Moments\nZ");
        assert_eq!(document.overview, "X");
        assert_eq!(document.trendy, "Y");
        assert_eq!(document.key_moments, "Z");
    }

    #[test]
    fn embedded_timestamps_pass_through_unmodified() {
        let raw = "## Summary\nS\n## Trendy Content\n- [00:12 - 00:56] \"quote\"\n## Key Moments\n- [01:05] reveal";
        let document = extract(raw);
        assert_eq!(document.trendy, "- [00:12 - 00:56] \"quote\"");
        assert_eq!(document.key_moments, "- [01:05] reveal");
    }

    #[test]
    fn extraction_is_idempotent() {
        let first = extract(WELL_FORMED);
        let second = extract(&first.raw_text);
        assert_eq!(first, second);
    }

    #[test]
    fn multi_line_bodies_are_kept_whole() {
        let raw = "Overview line one.\nOverview line two.\n## Trendy Content\na\nb\nc\n## Key Moments\nd\ne";
        let document = extract(raw);
        assert_eq!(document.overview, "Overview line one.\nOverview line two.");
        assert_eq!(document.trendy, "a\nb\nc");
        assert_eq!(document.key_moments, "d\ne");
    }
}
