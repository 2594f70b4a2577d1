use crate::prompts::SUMMARY_SEPARATOR;

/// Characters in `summaries` once joined for a combine request.
pub(crate) fn joined_len(summaries: &[String]) -> usize {
    let sep = SUMMARY_SEPARATOR.chars().count();
    let text: usize = summaries.iter().map(|s| s.chars().count()).sum();
    text + sep * summaries.len().saturating_sub(1)
}

/// Pack summaries, in order, into batches whose joined length stays within
/// `max_chars` where possible.
///
/// A batch is only closed once it holds two summaries, so two oversized
/// neighbours share a batch that exceeds `max_chars`, and every round shrinks
/// the list. A single summary left at the end forms its own batch.
pub fn plan_batches(summaries: Vec<String>, max_chars: usize) -> Vec<Vec<String>> {
    let sep = SUMMARY_SEPARATOR.chars().count();
    let mut batches = Vec::new();
    let mut current: Vec<String> = Vec::new();
    let mut current_len = 0;

    for summary in summaries {
        let len = summary.chars().count();
        let grown = if current.is_empty() {
            len
        } else {
            current_len + sep + len
        };

        if current.len() >= 2 && grown > max_chars {
            batches.push(std::mem::take(&mut current));
            current_len = len;
        } else {
            current_len = grown;
        }
        current.push(summary);
    }

    if !current.is_empty() {
        batches.push(current);
    }
    batches
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(lens: &[usize]) -> Vec<String> {
        lens.iter().map(|&n| "x".repeat(n)).collect()
    }

    fn shape(batches: &[Vec<String>]) -> Vec<usize> {
        batches.iter().map(Vec::len).collect()
    }

    #[test]
    fn packs_until_bound() {
        // 60 + 2 + 60 + 2 + 60 = 184 fits in 200; a fourth does not.
        let batches = plan_batches(texts(&[60; 8]), 200);
        assert_eq!(shape(&batches), vec![3, 3, 2]);
        for batch in &batches {
            assert!(joined_len(batch) <= 200);
        }
    }

    #[test]
    fn oversized_neighbours_are_paired() {
        let batches = plan_batches(texts(&[500, 500, 500]), 100);
        assert_eq!(shape(&batches), vec![2, 1]);
    }

    #[test]
    fn order_is_preserved() {
        let input: Vec<String> = (0..5).map(|i| format!("s{i}")).collect();
        let flat: Vec<String> = plan_batches(input.clone(), 7).into_iter().flatten().collect();
        assert_eq!(flat, input);
    }

    #[test]
    fn joined_len_counts_separators() {
        assert_eq!(joined_len(&texts(&[3, 4])), 9);
        assert_eq!(joined_len(&[]), 0);
    }
}
