//! Terminal implementation of the interactive chooser.
//!
//! The chooser only ever offers selections the resolver already
//! validated, so an accepted pick is usable by construction.

use std::io::{BufRead, BufReader, Stdin, Stdout, Write, stdin, stdout};
use std::path::PathBuf;

use rscout_core::RuntimeInstall;
use rscout_core::ports::{Choice, InstallChooser};

/// Chooser that prompts on a line-oriented terminal.
pub struct ConsoleChooser<R, W> {
    input: R,
    output: W,
}

impl ConsoleChooser<BufReader<Stdin>, Stdout> {
    pub fn stdio() -> Self {
        Self {
            input: BufReader::new(stdin()),
            output: stdout(),
        }
    }
}

impl<R: BufRead, W: Write> ConsoleChooser<R, W> {
    #[cfg(test)]
    fn with_streams(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// One trimmed input line; `None` on EOF or a read error.
    fn read_line(&mut self) -> Option<String> {
        let _ = self.output.flush();
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim().to_string()),
        }
    }

    /// Numbered selection loop. `None` means the user cancelled.
    fn pick_bin_dir(&mut self, candidates: &[RuntimeInstall]) -> Option<PathBuf> {
        loop {
            let _ = write!(
                self.output,
                "Select an installation [1-{}], 0 for automatic, or press Enter to cancel: ",
                candidates.len()
            );
            let answer = self.read_line()?;
            if answer.is_empty() {
                return None;
            }
            match answer.parse::<usize>() {
                Ok(0) => return Some(PathBuf::new()),
                Ok(n) if n <= candidates.len() => {
                    return Some(candidates[n - 1].bin_dir().to_path_buf());
                }
                _ => {
                    let _ = writeln!(self.output, "Not a valid selection.");
                }
            }
        }
    }

    fn pick_rendering_mode(&mut self, current: &str) -> Option<String> {
        let _ = write!(
            self.output,
            "Rendering mode (auto/desktop/software) [{current}]: "
        );
        let answer = self.read_line()?;
        if answer.is_empty() {
            Some(current.to_string())
        } else {
            Some(answer)
        }
    }
}

impl<R: BufRead, W: Write> InstallChooser for ConsoleChooser<R, W> {
    fn choose(
        &mut self,
        candidates: &[RuntimeInstall],
        current: &RuntimeInstall,
        rendering_mode: &str,
    ) -> Choice {
        if candidates.is_empty() {
            let _ = writeln!(self.output, "No usable R installations were found.");
            return Choice::Abandoned;
        }

        let _ = writeln!(self.output, "Available R installations:");
        for (index, candidate) in candidates.iter().enumerate() {
            let marker = if candidate == current { "*" } else { " " };
            let _ = writeln!(
                self.output,
                "{marker} {}. {} ({})",
                index + 1,
                candidate.description(),
                candidate.version()
            );
        }

        let Some(bin_dir) = self.pick_bin_dir(candidates) else {
            return Choice::Abandoned;
        };
        let Some(rendering_mode) = self.pick_rendering_mode(rendering_mode) else {
            return Choice::Abandoned;
        };

        Choice::Accepted {
            bin_dir,
            rendering_mode,
        }
    }
}
