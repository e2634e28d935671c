//! Built-in Connections puzzles with known answers.
//!
//! Words are listed answer group by answer group, so item `i` belongs to
//! answer `i / GROUP_SIZE`.

use rand::Rng;

use crate::connections::ConnectionsReport;
use crate::partition::{GROUP_COUNT, GROUP_SIZE, ITEM_COUNT};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoPuzzle {
    pub words: [&'static str; ITEM_COUNT],
    pub labels: [&'static str; GROUP_COUNT],
}

pub static DEMO_PUZZLES: [DemoPuzzle; 10] = [
    DemoPuzzle {
        words: [
            "bee", "tee", "cue", "sea", "pinch", "nick", "swipe", "lift", "brie", "feta", "gouda",
            "cheddar", "hand", "back", "arm", "face",
        ],
        labels: [
            "Homophones of letters",
            "Synonyms for steal",
            "Cheeses",
            "Body parts that are verbs",
        ],
    },
    DemoPuzzle {
        words: [
            "clubs", "hearts", "spades", "diamonds", "mars", "venus", "saturn", "uranus", "mail",
            "chat", "show", "court", "knee", "knot", "knit", "knob",
        ],
        labels: ["Card suits", "Planets", "___ room", "Silent 'k' words"],
    },
    DemoPuzzle {
        words: [
            "inch", "foot", "yard", "mile", "stare", "gaze", "peek", "view", "jack", "bill", "will",
            "mark", "level", "radar", "civic", "refer",
        ],
        labels: ["Units of length", "Ways to look", "Male names", "Palindromes"],
    },
    DemoPuzzle {
        words: [
            "beta", "gamma", "delta", "theta", "tango", "salsa", "waltz", "polka", "cook", "text",
            "note", "rule", "tiny", "mini", "petite", "wee",
        ],
        labels: ["Greek letters", "Dances", "___ book", "Synonyms for small"],
    },
    DemoPuzzle {
        words: [
            "punch", "time", "border", "finish", "maple", "cedar", "pine", "birch", "ruby",
            "python", "java", "rust", "fee", "fare", "toll", "rate",
        ],
        labels: ["___ line", "Trees", "Programming languages", "Charges"],
    },
    DemoPuzzle {
        words: [
            "dragon", "unicorn", "phoenix", "kraken", "bunt", "steal", "pitch", "swing", "chop",
            "stir", "bake", "boil", "robin", "crane", "heron", "gull",
        ],
        labels: ["Mythical creatures", "Baseball actions", "Cooking verbs", "Birds"],
    },
    DemoPuzzle {
        words: [
            "scarlet", "crimson", "ruby", "maroon", "pre", "fore", "ante", "prior", "board", "bird",
            "jack", "list", "pots", "tops", "post", "spot",
        ],
        labels: ["Shades of red", "Prefixes meaning before", "___ black", "Anagrams of stop"],
    },
    DemoPuzzle {
        words: [
            "ounce", "pound", "quart", "pint", "pen", "ruler", "glue", "eraser", "tomb", "mile",
            "touch", "corner", "mad", "irate", "upset", "sore",
        ],
        labels: ["Units of measure", "School supplies", "___ stone", "Synonyms for angry"],
    },
    DemoPuzzle {
        words: [
            "cirrus", "cumulus", "stratus", "nimbus", "penne", "fusilli", "orzo", "rigatoni", "air",
            "witch", "hover", "space", "bold", "game", "plucky", "valiant",
        ],
        labels: ["Cloud types", "Pasta shapes", "___ craft", "Synonyms for brave"],
    },
    DemoPuzzle {
        words: [
            "king", "queen", "rook", "bishop", "loafer", "pump", "mule", "clog", "break", "burn",
            "ache", "beat", "won", "too", "fore", "ate",
        ],
        labels: ["Chess pieces", "Types of shoes", "___ heart", "Homophones of numbers"],
    },
];

/// A random demo puzzle and its index in [`DEMO_PUZZLES`].
pub fn pick_demo<R: Rng + ?Sized>(rng: &mut R) -> (usize, &'static DemoPuzzle) {
    let index = rng.gen_range(0..DEMO_PUZZLES.len());
    (index, &DEMO_PUZZLES[index])
}

impl DemoPuzzle {
    pub fn words(&self) -> Vec<String> {
        self.words.iter().map(|w| w.to_string()).collect()
    }

    /// Answer group `members` spell out exactly, if any.
    pub fn matching_answer(&self, members: &[usize; GROUP_SIZE]) -> Option<usize> {
        let answer = members[0] / GROUP_SIZE;
        members.iter().all(|&m| m / GROUP_SIZE == answer).then_some(answer)
    }

    /// Give every correctly found group its answer label. Returns the
    /// number of groups found.
    pub fn label_report(&self, report: &mut ConnectionsReport) -> usize {
        let mut found = 0;
        for group in &mut report.groups {
            if let Some(answer) = self.matching_answer(&group.members) {
                group.label = self.labels[answer].to_string();
                found += 1;
            }
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_puzzles_well_formed() {
        for puzzle in &DEMO_PUZZLES {
            let mut words = puzzle.words.to_vec();
            words.sort_unstable();
            words.dedup();
            assert_eq!(words.len(), ITEM_COUNT);
            assert!(puzzle.words.iter().all(|w| w.bytes().all(|b| b.is_ascii_lowercase())));
        }
    }

    #[test]
    fn test_matching_answer() {
        let puzzle = &DEMO_PUZZLES[0];
        assert_eq!(puzzle.matching_answer(&[8, 9, 10, 11]), Some(2));
        assert_eq!(puzzle.matching_answer(&[0, 1, 2, 4]), None);
    }
}
