use aura_domain::PodcastStyle;

/// Style directive applied when summarizing. Wording varies per genre;
/// the three `##` section headings below are load-bearing, since
/// extraction anchors on them.
fn summary_directive(style: PodcastStyle) -> &'static str {
    match style {
        PodcastStyle::General => "Summarize in a clear and concise way for any type of podcast.",
        PodcastStyle::News => {
            "Focus on headlines, breaking updates, and key facts. Highlight what is new and relevant."
        }
        PodcastStyle::Sports => {
            "Emphasize match highlights, scores, player performances, controversies, and crowd reactions."
        }
        PodcastStyle::Comedy => "Extract jokes, punchlines, funny exchanges, and humorous context.",
        PodcastStyle::Technology => {
            "Highlight product launches, trends, innovations, technical discussions, and future outlook."
        }
        PodcastStyle::Business => {
            "Focus on financial insights, market trends, strategies, and key announcements."
        }
        PodcastStyle::Education => {
            "Highlight learning points, key concepts, and examples useful for learners."
        }
        PodcastStyle::TrueCrime => {
            "For Summary: recap case details, suspects, and investigations. For Trendy Content: shocking revelations or twists. For Key Moments: evidence discussions or timeline events."
        }
    }
}

fn answer_directive(style: PodcastStyle) -> &'static str {
    match style {
        PodcastStyle::General => "Answer in a neutral, informative way.",
        PodcastStyle::News => "Answer factually, highlighting headlines and recent developments.",
        PodcastStyle::Sports => "Answer like a sports commentator, with excitement where relevant.",
        PodcastStyle::Comedy => "Answer with humor, light tone, and highlight punchlines.",
        PodcastStyle::Technology => "Answer like a tech analyst, focusing on innovations and trends.",
        PodcastStyle::Business => "Answer like a market analyst, focusing on strategy and finance.",
        PodcastStyle::Education => "Answer like a teacher, breaking down complex ideas clearly.",
        PodcastStyle::TrueCrime => "Answer soberly, sticking to case facts and the timeline.",
    }
}

/// Prompt for the summarization stage. Output contract: three sections
/// introduced by `## Summary`, `## Trendy Content`, `## Key Moments`,
/// with transcript timestamps quoted verbatim.
pub fn build_summary_prompt(dialogue_text: &str, style: PodcastStyle) -> String {
    format!(
        "You are analyzing a {genre} podcast transcript.\n\n\
         {directive}\n\n\
         Organize the output into three sections:\n\
         1. ## Summary: Concise overview.\n\
         2. ## Trendy Content: Engaging, viral or interesting clips with [mm:ss] timestamps.\n\
            - Include exact quoted text from the transcript for each point.\n\
            - Use the exact timestamps provided in the transcript (if it says [00:12 - 00:56], use that directly; do not recalculate them).\n\
         3. ## Key Moments: Major highlights with [mm:ss] timestamps.\n\
            - Include exact quoted text from the transcript for each point.\n\
            - Use the exact timestamps provided in the transcript; do not recalculate them.\n\n\
         Transcript:\n{dialogue}",
        genre = style.label(),
        directive = summary_directive(style),
        dialogue = dialogue_text,
    )
}

/// Prompt for one follow-up question. Grounding uses the full rendered
/// dialogue plus the full summary raw text, not the extracted views.
pub fn build_chat_prompt(
    dialogue_text: &str,
    summary_raw_text: &str,
    question: &str,
    style: PodcastStyle,
) -> String {
    format!(
        "You are a helpful chatbot for a {genre} podcast.\n\
         {directive}\n\n\
         Always cite timestamps in [mm:ss - mm:ss] format when referencing events.\n\
         - Use the exact timestamps from the transcript; do not recalculate them.\n\
         - If the question asks when something happened, answer with the event plus its exact timestamp range.\n\
         - If the event does not exist, say: 'This was not mentioned in the audio.'\n\n\
         **Transcription**:\n{dialogue}\n\n\
         **Summary**:\n{summary}\n\n\
         **User Question**: {question}",
        genre = style.label(),
        directive = answer_directive(style),
        dialogue = dialogue_text,
        summary = summary_raw_text,
        question = question,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_prompt_demands_the_three_section_headings() {
        let prompt = build_summary_prompt("[A 00:00 - 00:05] hi", PodcastStyle::General);
        assert!(prompt.contains("## Summary"));
        assert!(prompt.contains("## Trendy Content"));
        assert!(prompt.contains("## Key Moments"));
        assert!(prompt.contains("[A 00:00 - 00:05] hi"));
    }

    #[test]
    fn chat_prompt_grounds_on_dialogue_summary_and_question() {
        let prompt = build_chat_prompt(
            "[A 00:00 - 00:05] hi",
            "## Summary\nGreetings.",
            "When was the greeting?",
            PodcastStyle::News,
        );
        assert!(prompt.contains("[A 00:00 - 00:05] hi"));
        assert!(prompt.contains("## Summary\nGreetings."));
        assert!(prompt.contains("When was the greeting?"));
        assert!(prompt.contains("News podcast"));
    }
}
