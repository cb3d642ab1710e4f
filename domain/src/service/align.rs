use crate::{DialogueLine, RawUtterance, Utterance};

use super::timecode::format_mmss;

const UNKNOWN_SPEAKER: &str = "Unknown";

/// Converts raw diarization segments into speaker-attributed utterances
/// with offsets in seconds. 1:1 passthrough, no merging of adjacent
/// same-speaker segments; never fails. Output is ordered by start
/// offset, stable on ties, so already-chronological input keeps its
/// emission order.
pub fn align(mut segments: Vec<RawUtterance>) -> Vec<Utterance> {
    segments.sort_by_key(|segment| segment.start_ms);
    segments
        .into_iter()
        .map(|segment| Utterance {
            speaker_label: segment
                .speaker
                .filter(|speaker| !speaker.is_empty())
                .unwrap_or_else(|| UNKNOWN_SPEAKER.to_string()),
            start_seconds: segment.start_ms as f64 / 1000.0,
            end_seconds: segment.end_ms as f64 / 1000.0,
            text: segment.text.unwrap_or_default(),
        })
        .collect()
}

/// Renders one utterance as `[<speaker> <mm:ss> - <mm:ss>] <text>`.
pub fn render_line(utterance: &Utterance) -> DialogueLine {
    DialogueLine(format!(
        "[{} {} - {}] {}",
        utterance.speaker_label,
        format_mmss(utterance.start_seconds),
        format_mmss(utterance.end_seconds),
        utterance.text
    ))
}

pub fn render_dialogue(utterances: &[Utterance]) -> Vec<DialogueLine> {
    utterances.iter().map(render_line).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(speaker: &str, start_ms: u64, end_ms: u64, text: &str) -> RawUtterance {
        RawUtterance {
            speaker: Some(speaker.to_string()),
            start_ms,
            end_ms,
            text: Some(text.to_string()),
        }
    }

    #[test]
    fn renders_speaker_and_mmss_range() {
        let utterances = align(vec![segment("A", 1000, 2500, "hi")]);
        let lines = render_dialogue(&utterances);
        assert_eq!(lines[0].as_str(), "[A 00:01 - 00:02] hi");
    }

    #[test]
    fn preserves_chronological_input_order() {
        let utterances = align(vec![
            segment("A", 0, 900, "first"),
            segment("B", 900, 1800, "second"),
            segment("A", 1800, 2400, "third"),
        ]);
        let texts: Vec<&str> = utterances.iter().map(|u| u.text.as_str()).collect();
        assert_eq!(texts, ["first", "second", "third"]);
    }

    #[test]
    fn equal_starts_keep_emission_order() {
        let utterances = align(vec![
            segment("A", 500, 700, "one"),
            segment("B", 500, 900, "two"),
        ]);
        assert_eq!(utterances[0].text, "one");
        assert_eq!(utterances[1].text, "two");
    }

    #[test]
    fn missing_speaker_defaults_to_unknown() {
        let utterances = align(vec![RawUtterance {
            speaker: None,
            start_ms: 0,
            end_ms: 1000,
            text: Some("hello".to_string()),
        }]);
        assert_eq!(utterances[0].speaker_label, "Unknown");
    }

    #[test]
    fn missing_text_defaults_to_empty() {
        let utterances = align(vec![RawUtterance {
            speaker: Some("A".to_string()),
            start_ms: 0,
            end_ms: 1000,
            text: None,
        }]);
        assert_eq!(utterances[0].text, "");
        assert_eq!(render_line(&utterances[0]).as_str(), "[A 00:00 - 00:01] ");
    }

    #[test]
    fn millisecond_offsets_become_seconds() {
        let utterances = align(vec![segment("A", 61_500, 125_000, "x")]);
        assert_eq!(utterances[0].start_seconds, 61.5);
        assert_eq!(
            render_line(&utterances[0]).as_str(),
            "[A 01:01 - 02:05] x"
        );
    }
}
