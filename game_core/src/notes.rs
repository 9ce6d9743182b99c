//! The note grid: one chromatic octave used to label pitch and pick pipe targets.

use serde::Serialize;

/// A named pitch
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Note {
    pub name: &'static str,
    pub freq: f32,
}

impl Note {
    pub const fn new(name: &'static str, freq: f32) -> Self {
        Self { name, freq }
    }

    /// Naturals are the notes without a sharp
    pub fn is_natural(&self) -> bool {
        !self.name.contains('#')
    }
}

const CHROMATIC_A4: [Note; 12] = [
    Note::new("A4", 440.00),
    Note::new("A#4", 466.16),
    Note::new("B4", 493.88),
    Note::new("C5", 523.25),
    Note::new("C#5", 554.37),
    Note::new("D5", 587.33),
    Note::new("D#5", 622.25),
    Note::new("E5", 659.25),
    Note::new("F5", 698.46),
    Note::new("F#5", 739.99),
    Note::new("G5", 783.99),
    Note::new("G#5", 830.61),
];

/// Ordered note table
#[derive(Debug, Clone, PartialEq)]
pub struct NoteGrid {
    notes: Vec<Note>,
}

impl NoteGrid {
    /// Build the grid for a frequency range.
    ///
    /// The grid is always the A4..G#5 chromatic octave; the range is accepted
    /// so callers rebuild whenever it changes, but does not filter the table.
    pub fn build(_min_freq: f32, _max_freq: f32) -> Self {
        Self {
            notes: CHROMATIC_A4.to_vec(),
        }
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Nearest note by log-frequency distance; ties go to the earlier entry.
    ///
    /// Non-positive input compares as infinitely far from every note and
    /// therefore resolves to the first entry.
    pub fn closest_note(&self, freq: f32) -> Option<&Note> {
        let log_freq = freq.ln();
        let mut notes = self.notes.iter();
        let mut best = notes.next()?;
        let mut best_diff = (log_freq - best.freq.ln()).abs();
        for note in notes {
            let diff = (log_freq - note.freq.ln()).abs();
            if diff < best_diff {
                best = note;
                best_diff = diff;
            }
        }
        Some(best)
    }

    /// Natural notes only, in grid order
    pub fn natural_notes(&self) -> Vec<Note> {
        self.notes.iter().copied().filter(Note::is_natural).collect()
    }
}
