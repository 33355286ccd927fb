use std::io::{self, Write};

pub const SPINNER: [char; 4] = ['/', '-', '\\', '|'];

/// Console surface: a single status line overwritten in place.
pub struct Display<W: Write> {
    out: W,
    spinner: usize,
}

impl<W: Write> Display<W> {
    pub fn new(out: W) -> Self {
        Self { out, spinner: 0 }
    }

    pub fn banner(&mut self) -> io::Result<()> {
        write!(
            self.out,
            "Timer Interrupt Interval Measurement Tool [v{}]\n\nInitializing...",
            env!("CARGO_PKG_VERSION")
        )?;
        self.out.flush()
    }

    /// Rewrites the status line and advances the spinner one frame.
    pub fn reading(&mut self, ms: f64) -> io::Result<()> {
        write!(
            self.out,
            "\rCurrent Timer Interval: {:4.1} ms [{}]",
            ms, SPINNER[self.spinner]
        )?;
        self.spinner = (self.spinner + 1) % SPINNER.len();
        self.out.flush()
    }

    pub fn farewell(&mut self) -> io::Result<()> {
        write!(self.out, "\n\nCTRL+C received: Application will exit now...\n\n")?;
        self.out.flush()
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn reading_format() {
        let mut d = Display::new(Vec::new());
        d.reading(15.625).unwrap();
        assert_eq!(lines(d.into_inner()), "\rCurrent Timer Interval: 15.6 ms [/]");
    }

    #[test]
    fn narrow_values_are_padded() {
        let mut d = Display::new(Vec::new());
        d.reading(1.0).unwrap();
        assert_eq!(lines(d.into_inner()), "\rCurrent Timer Interval:  1.0 ms [/]");
    }

    #[test]
    fn spinner_cycles_four_frames() {
        let mut d = Display::new(Vec::new());
        for _ in 0..5 {
            d.reading(1.0).unwrap();
        }
        let out = lines(d.into_inner());
        let frames: String = out
            .split('\r')
            .filter(|s| !s.is_empty())
            .map(|s| s.chars().nth_back(1).unwrap())
            .collect();
        assert_eq!(frames, "/-\\|/");
    }

    #[test]
    fn farewell_mentions_exit() {
        let mut d = Display::new(Vec::new());
        d.farewell().unwrap();
        assert!(lines(d.into_inner()).contains("Application will exit now"));
    }

    #[test]
    fn banner_ends_with_initializing() {
        let mut d = Display::new(Vec::new());
        d.banner().unwrap();
        assert!(lines(d.into_inner()).ends_with("Initializing..."));
    }
}
