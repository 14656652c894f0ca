use std::collections::HashMap;

/// Words this short carry no signal in a note ("ок", "и", …).
const MIN_WORD_CHARS: usize = 3;

/// The `limit` most frequent words across the given notes, lower-cased
/// and tokenized on whitespace. Words shorter than three characters are
/// dropped. Ties are broken by first-encountered order, so the ranking
/// is stable across runs.
pub fn top_words<'a>(
    notes: impl IntoIterator<Item = &'a str>,
    limit: usize,
) -> Vec<(String, usize)> {
    let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
    let mut next_rank = 0usize;

    for note in notes {
        for word in note.split_whitespace() {
            let word = word.to_lowercase();
            if word.chars().count() < MIN_WORD_CHARS {
                continue;
            }
            let entry = counts.entry(word).or_insert_with(|| {
                let rank = next_rank;
                next_rank += 1;
                (0, rank)
            });
            entry.0 += 1;
        }
    }

    let mut ranked: Vec<(String, (usize, usize))> = counts.into_iter().collect();
    ranked.sort_by(|(_, (count_a, rank_a)), (_, (count_b, rank_b))| {
        count_b.cmp(count_a).then(rank_a.cmp(rank_b))
    });

    ranked
        .into_iter()
        .take(limit)
        .map(|(word, (count, _))| (word, count))
        .collect()
}
