use crate::vocab::{Language, VocabEntry};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

/// Field that must be unique across the choices of one question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Discriminator {
    ImagePath,
    Word(Language),
}

impl Discriminator {
    pub fn value<'a>(&self, entry: &'a VocabEntry) -> &'a str {
        match self {
            Discriminator::ImagePath => entry.img_url.trim(),
            Discriminator::Word(language) => entry.word(1, *language).trim(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    /// Dataset index of the entry this choice was taken from.
    pub entry: usize,
    /// The discriminator value shown to the user.
    pub label: String,
}

/// Picks up to `count` distractors for `entries[correct]` from the dataset
/// indices in `pool`.
///
/// Candidates whose discriminator is empty or equal to the correct entry's are
/// dropped, and only the first entry per distinct value is kept, so the result
/// never repeats a value. The remaining candidates are sampled without
/// replacement; when fewer than `count` exist all of them are returned.
pub fn select_distractors<R: Rng + ?Sized>(
    entries: &[VocabEntry],
    pool: &[usize],
    correct: usize,
    count: usize,
    discriminator: Discriminator,
    rng: &mut R,
) -> Vec<usize> {
    let Some(correct_entry) = entries.get(correct) else {
        return Vec::new();
    };
    let correct_value = discriminator.value(correct_entry);

    let mut seen: HashSet<&str> = HashSet::new();
    seen.insert(correct_value);

    let eligible: Vec<usize> = pool
        .iter()
        .copied()
        .filter(|&index| index != correct)
        .filter(|&index| match entries.get(index) {
            Some(entry) => {
                let value = discriminator.value(entry);
                !value.is_empty() && seen.insert(value)
            }
            None => false,
        })
        .collect();

    eligible.choose_multiple(rng, count).copied().collect()
}

/// Mixes the correct entry into the distractors and returns the shuffled
/// choices with the position of the correct one.
pub fn build_choices<R: Rng + ?Sized>(
    entries: &[VocabEntry],
    correct: usize,
    distractors: &[usize],
    discriminator: Discriminator,
    rng: &mut R,
) -> (Vec<Choice>, usize) {
    let mut choices: Vec<Choice> = distractors
        .iter()
        .chain(std::iter::once(&correct))
        .filter_map(|&index| {
            entries.get(index).map(|entry| Choice {
                entry: index,
                label: discriminator.value(entry).to_string(),
            })
        })
        .collect();

    choices.shuffle(rng);

    let correct_index = choices
        .iter()
        .position(|choice| choice.entry == correct)
        .unwrap_or(0);
    (choices, correct_index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::tests::entry;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn five_words() -> Vec<VocabEntry> {
        vec![
            entry("apple", "りんご", "noun", true),
            entry("dog", "犬", "noun", true),
            entry("book", "本", "noun", true),
            entry("train", "電車", "noun", true),
            entry("water", "水", "noun", true),
        ]
    }

    #[test]
    fn test_distractors_exclude_correct_and_are_unique() {
        let entries = five_words();
        let pool: Vec<usize> = (0..entries.len()).collect();
        let discriminator = Discriminator::Word(Language::Japanese);

        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let picked = select_distractors(&entries, &pool, 0, 3, discriminator, &mut rng);

            assert_eq!(picked.len(), 3);
            assert!(!picked.contains(&0));
            let values: HashSet<&str> = picked
                .iter()
                .map(|&i| discriminator.value(&entries[i]))
                .collect();
            assert_eq!(values.len(), 3);
            assert!(!values.contains("りんご"));
        }
    }

    #[test]
    fn test_duplicate_values_are_collapsed() {
        let mut entries = five_words();
        // Same picture as the correct entry, and two entries sharing another one.
        entries[1].img_url = entries[0].img_url.clone();
        entries[3].img_url = entries[2].img_url.clone();
        let pool: Vec<usize> = (0..entries.len()).collect();

        let mut rng = StdRng::seed_from_u64(7);
        let picked = select_distractors(
            &entries,
            &pool,
            0,
            10,
            Discriminator::ImagePath,
            &mut rng,
        );

        // Eligible values: book's picture (first of 2 and 3) and water's.
        assert_eq!(picked.len(), 2);
        assert!(picked.contains(&2));
        assert!(picked.contains(&4));
    }

    #[test]
    fn test_insufficient_pool_returns_what_exists() {
        let entries = five_words();
        let mut rng = StdRng::seed_from_u64(1);
        let picked = select_distractors(
            &entries,
            &[0, 1],
            0,
            3,
            Discriminator::Word(Language::English),
            &mut rng,
        );
        assert_eq!(picked, vec![1]);

        let none = select_distractors(
            &entries,
            &[0],
            0,
            3,
            Discriminator::Word(Language::English),
            &mut rng,
        );
        assert!(none.is_empty());
    }

    #[test]
    fn test_empty_values_are_not_eligible() {
        let mut entries = five_words();
        for e in entries.iter_mut().skip(1) {
            e.img_url.clear();
        }
        let pool: Vec<usize> = (0..entries.len()).collect();
        let mut rng = StdRng::seed_from_u64(3);
        let picked = select_distractors(
            &entries,
            &pool,
            0,
            2,
            Discriminator::ImagePath,
            &mut rng,
        );
        assert!(picked.is_empty());
    }

    #[test]
    fn test_build_choices_records_correct_position() {
        let entries = five_words();
        let discriminator = Discriminator::Word(Language::Japanese);

        for seed in 0..30 {
            let mut rng = StdRng::seed_from_u64(seed);
            let (choices, correct) = build_choices(&entries, 2, &[0, 3, 4], discriminator, &mut rng);

            assert_eq!(choices.len(), 4);
            assert_eq!(choices[correct].entry, 2);
            assert_eq!(choices[correct].label, "本");
            assert_eq!(
                choices.iter().filter(|choice| choice.entry == 2).count(),
                1
            );
        }
    }

    #[test]
    fn test_shuffle_reaches_every_position() {
        let entries = five_words();
        let mut positions = HashSet::new();
        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            let (_, correct) = build_choices(
                &entries,
                0,
                &[1, 2],
                Discriminator::ImagePath,
                &mut rng,
            );
            positions.insert(correct);
        }
        assert_eq!(positions.len(), 3);
    }
}
