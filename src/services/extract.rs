/// Recognized clock expressions and their canonical tokens.
///
/// Whole hours from 9 AM to 8 PM, with and without a space before the
/// meridiem. New expressions are supported by adding rows here.
const TIME_CATALOGUE: &[(&[&str], &str)] = &[
    (&["9 am", "9am"], "09:00 AM"),
    (&["10 am", "10am"], "10:00 AM"),
    (&["11 am", "11am"], "11:00 AM"),
    (&["12 pm", "12pm"], "12:00 PM"),
    (&["1 pm", "1pm"], "01:00 PM"),
    (&["2 pm", "2pm"], "02:00 PM"),
    (&["3 pm", "3pm"], "03:00 PM"),
    (&["4 pm", "4pm"], "04:00 PM"),
    (&["5 pm", "5pm"], "05:00 PM"),
    (&["6 pm", "6pm"], "06:00 PM"),
    (&["7 pm", "7pm"], "07:00 PM"),
    (&["8 pm", "8pm"], "08:00 PM"),
];

const AVAILABILITY_WORDS: &[&str] = &["available", "free", "can", "will", "time", "when"];

/// Canonical time tokens found in `body`, in order of first occurrence.
pub fn extract_time_mentions(body: &str) -> Vec<String> {
    let lower = body.to_lowercase();

    let mut found: Vec<(usize, &str)> = TIME_CATALOGUE
        .iter()
        .filter_map(|(patterns, canonical)| {
            patterns
                .iter()
                .filter_map(|p| first_standalone_match(&lower, p))
                .min()
                .map(|pos| (pos, *canonical))
        })
        .collect();

    found.sort_by_key(|(pos, _)| *pos);
    found.into_iter().map(|(_, t)| t.to_string()).collect()
}

pub fn first_time_mention(body: &str) -> Option<String> {
    extract_time_mentions(body).into_iter().next()
}

pub fn has_availability_language(body: &str) -> bool {
    let lower = body.to_lowercase();
    AVAILABILITY_WORDS.iter().any(|w| lower.contains(w))
}

// A match glued to a preceding digit belongs to a different hour ("12 pm" vs "2 pm").
fn first_standalone_match(haystack: &str, pattern: &str) -> Option<usize> {
    haystack.match_indices(pattern).map(|(i, _)| i).find(|&i| {
        !haystack[..i]
            .chars()
            .next_back()
            .is_some_and(|c| c.is_ascii_digit())
    })
}
