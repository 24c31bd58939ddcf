use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use anyhow::{Result, Context};

use crate::alignment::WordTiming;
use crate::errors::SubtitleError;

// @module: Word-level subtitle cue generation and SRT rendering

// @struct: Single timed subtitle cue
#[derive(Debug, Clone, PartialEq)]
pub struct SubtitleCue {
    // @field: 1-based sequential index
    pub index: usize,

    // @field: Start time in ms
    pub start_ms: u64,

    // @field: End time in ms
    pub end_ms: u64,

    // @field: Cue text
    pub text: String,
}

impl SubtitleCue {
    /// Creates a new subtitle cue
    pub fn new(index: usize, start_ms: u64, end_ms: u64, text: String) -> Self {
        SubtitleCue {
            index,
            start_ms,
            end_ms,
            text,
        }
    }

    /// Convert a floating-point second count to whole milliseconds.
    ///
    /// Rounds to the nearest millisecond: 1.005 seconds is stored by the
    /// float format as 1.00499… and must become 1005, not 1004. NaN,
    /// infinities and negative values are contract violations.
    pub fn ms_from_seconds(seconds: f64) -> Result<u64, SubtitleError> {
        if !seconds.is_finite() || seconds < 0.0 {
            return Err(SubtitleError::InvalidTimestamp(seconds));
        }
        Ok((seconds * 1000.0).round() as u64)
    }

    /// Convert start time to formatted SRT timestamp
    pub fn format_start_time(&self) -> String {
        Self::format_timestamp(self.start_ms)
    }

    /// Convert end time to formatted SRT timestamp
    pub fn format_end_time(&self) -> String {
        Self::format_timestamp(self.end_ms)
    }

    /// Format a timestamp in milliseconds to SRT format (HH:MM:SS,mmm)
    pub fn format_timestamp(ms: u64) -> String {
        let hours = ms / 3_600_000;
        let minutes = (ms % 3_600_000) / 60_000;
        let seconds = (ms % 60_000) / 1_000;
        let millis = ms % 1_000;

        format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
    }
}

impl fmt::Display for SubtitleCue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.index)?;
        writeln!(f, "{} --> {}", self.format_start_time(), self.format_end_time())?;
        writeln!(f, "{}", self.text)?;
        writeln!(f)
    }
}

/// An ordered set of subtitle cues generated in one pass
#[derive(Debug, Default)]
pub struct SubtitleTrack {
    /// List of subtitle cues
    pub cues: Vec<SubtitleCue>,
}

impl SubtitleTrack {
    /// Build a subtitle track from an ordered word sequence.
    ///
    /// Words are taken in the order given (upstream alignment order is
    /// trusted, never re-sorted) and grouped into runs of `words_per_cue`;
    /// the final run may be shorter. Each cue starts at its first word and
    /// ends where the next cue starts, so consecutive cues abut with zero
    /// gap; only the last cue ends at its own last word. `time_offset` is
    /// added to every boundary, for audio that starts partway into the
    /// composed timeline.
    pub fn from_words(
        words: &[WordTiming],
        words_per_cue: usize,
        time_offset: f64,
    ) -> Result<Self, SubtitleError> {
        if words_per_cue == 0 {
            return Err(SubtitleError::InvalidGroupSize);
        }

        let mut cues = Vec::with_capacity(words.len().div_ceil(words_per_cue));

        for (i, group) in words.chunks(words_per_cue).enumerate() {
            let start_seconds = group[0].start;
            // Look-ahead boundary: the cue ends where the next one begins
            let end_seconds = match words.get((i + 1) * words_per_cue) {
                Some(next_word) => next_word.start,
                None => group[group.len() - 1].end,
            };

            let text = group
                .iter()
                .map(|w| w.text.as_str())
                .collect::<Vec<_>>()
                .join(" ");

            cues.push(SubtitleCue {
                index: i + 1,
                start_ms: SubtitleCue::ms_from_seconds(start_seconds + time_offset)?,
                end_ms: SubtitleCue::ms_from_seconds(end_seconds + time_offset)?,
                text,
            });
        }

        Ok(SubtitleTrack { cues })
    }

    /// Number of cues in the track
    pub fn len(&self) -> usize {
        self.cues.len()
    }

    /// Whether the track has no cues
    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }

    /// Render the whole track as SRT text.
    ///
    /// An empty track renders as an empty string, which writes as a
    /// zero-length file.
    pub fn to_srt_string(&self) -> String {
        let mut out = String::new();
        for cue in &self.cues {
            out.push_str(&cue.to_string());
        }
        out
    }

    /// Write the track to an SRT file
    pub fn write_to_srt<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();

        // Create parent directory if needed
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let mut file = File::create(path)
            .with_context(|| format!("Failed to create subtitle file: {}", path.display()))?;

        file.write_all(self.to_srt_string().as_bytes())
            .with_context(|| format!("Failed to write subtitle file: {}", path.display()))?;

        Ok(())
    }

    /// Total duration covered by the track in milliseconds, if any cues exist
    pub fn span_ms(&self) -> Option<(u64, u64)> {
        match (self.cues.first(), self.cues.last()) {
            (Some(first), Some(last)) => Some((first.start_ms, last.end_ms)),
            _ => None,
        }
    }
}

impl fmt::Display for SubtitleTrack {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Subtitle Track")?;
        writeln!(f, "Cues: {}", self.cues.len())?;
        Ok(())
    }
}
