//! Prompt templates for the three kinds of inference request.
//!
//! Each template embeds its target length as a literal percentage
//! (e.g. `30%`). The model is only asked to aim for it.

/// Per-chunk (map) request.
pub fn map_prompt(text: &str, percent: u32) -> String {
    format!(
        "You are a highly skilled book summarizer. Your goal is to create a concise summary that \
captures the key information from the following part of a book.
Keep the titles, headings and other structural information, and do not lose any context or \
the overall flow of the book. Focus on preserving the most important facts, concepts and details.
Maintain the original meaning and context while reducing the length. Aim for a summary that is \
about {percent}% of the original length.

Text to summarize:
{text}

CONCISE SUMMARY:
"
    )
}

/// Request used when the whole document fits in one chunk.
pub fn single_chunk_prompt(text: &str, percent: u32) -> String {
    format!(
        "Summarize the following text of the book to approximately {percent}% of its original length.
Add or remove information as needed, but the result has to be {percent}% of its original size.
Do not narrate the document or the book. Keep its format and flow exactly as they are and never \
override the format.
Remove filler talk and filler passages. Summarize only the main facts, narration, information and \
stories without losing their details.
Preserve the key information, main points and essential details. Maintain the original meaning and context.
Each paragraph is connected to the previous and the next one, so keep the flow and do not add \
your own voice.

TEXT:
{text}

SUMMARY:
"
    )
}

/// Reduce request merging partial summaries, given in document order.
pub fn combine_prompt(summaries: &[String], percent: u32) -> String {
    let text = summaries.join(SUMMARY_SEPARATOR);
    format!(
        "You are a highly skilled book and text editor. Your task is to combine the following \
summaries into a single coherent summary that flows naturally. Eliminate redundancies and ensure \
the final summary is well-structured and easy to read. Focus on maintaining a logical flow of \
ideas. The final summary should be approximately {percent}% of the original document's length.

SUMMARIES TO COMBINE:
{text}

COMBINED SUMMARY:
"
    )
}

/// Placed between partial summaries inside a combine request.
pub const SUMMARY_SEPARATOR: &str = "\n\n";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompts_embed_percentage_and_text() {
        let p = single_chunk_prompt("The quick fox.", 30);
        assert!(p.contains("approximately 30% of its original length"));
        assert!(p.contains("The quick fox."));

        let p = map_prompt("Chunk body", 30);
        assert!(p.contains("about 30% of the original length"));
        assert!(p.contains("Chunk body"));
    }

    #[test]
    fn combine_lists_summaries_in_order() {
        let p = combine_prompt(&["first".into(), "second".into()], 60);
        assert!(p.contains("first\n\nsecond"));
        assert!(p.contains("approximately 60%"));
    }
}
