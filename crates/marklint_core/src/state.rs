//! Rolling counters carried from line to line within one pass.

/// Per-pass state shared by the rule set and the fixer.
///
/// A fresh value is created for every `lint`/`fix` call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RollingState {
    /// Marker of the first zero-indent list item in the document.
    pub first_list_marker: Option<char>,
    /// Blank lines in the current run, including the current one.
    pub consecutive_blanks: usize,
    /// Level of the most recent well-formed heading (0 = none yet).
    pub prev_heading_level: u8,
}

impl RollingState {
    /// Creates a fresh state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records whether the current line is blank and returns the length of
    /// the blank run it belongs to (0 for a non-blank line).
    pub fn observe_line(&mut self, blank: bool) -> usize {
        if blank {
            self.consecutive_blanks += 1;
        } else {
            self.consecutive_blanks = 0;
        }
        self.consecutive_blanks
    }

    /// Ends the current blank run. Called for lines the rules never see.
    pub fn reset_blanks(&mut self) {
        self.consecutive_blanks = 0;
    }

    /// Records a list marker and returns the expected marker when it differs
    /// from the first one seen.
    pub fn check_list_marker(&mut self, marker: char) -> Option<char> {
        match self.first_list_marker {
            None => {
                self.first_list_marker = Some(marker);
                None
            }
            Some(first) if first != marker => Some(first),
            Some(_) => None,
        }
    }

    /// Records a well-formed heading and returns the previous level.
    pub fn enter_heading(&mut self, level: u8) -> u8 {
        std::mem::replace(&mut self.prev_heading_level, level)
    }
}
