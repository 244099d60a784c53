//! How the program execution interacts with the environment.
//!
//! Includes, e.g., input/output streams and the random number generator.

use std::io::{BufRead, Write};

use log::debug;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use super::err::*;
use super::io::*;

pub trait RunContext {
    /// Reads one line of input, without its terminator.
    /// End of input reads as an empty line.
    fn read_line(self: &mut Self) -> RResult<String>;

    /// Reads up to `n` characters, fewer only at end of input.
    fn read_chars(self: &mut Self, n: usize) -> RResult<String>;

    fn write_line(self: &mut Self, text: &str) -> RResult<()>;

    fn rng(self: &mut Self) -> &mut dyn RngCore;
}

/// A context over a buffered reader and a writer.
pub struct Runner<R: BufRead, W: Write> {
    pub input: R,
    pub output: W,
    pub rng: StdRng,
}

impl<R: BufRead, W: Write> Runner<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Runner {
            input,
            output,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(input: R, output: W, seed: u64) -> Self {
        Runner {
            input,
            output,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: BufRead, W: Write> RunContext for Runner<R, W> {
    fn read_line(self: &mut Self) -> RResult<String> {
        let line = next_line(&mut self.input)?.unwrap_or_default();
        debug!("READ  {:?}", line);
        Ok(line)
    }

    fn read_chars(self: &mut Self, n: usize) -> RResult<String> {
        let mut text = String::new();
        for _ in 0..n {
            match next_char(&mut self.input)? {
                Some(c) => text.push(c),
                None => break,
            }
        }
        debug!("READ  {:?}", text);
        Ok(text)
    }

    fn write_line(self: &mut Self, text: &str) -> RResult<()> {
        writeln!(self.output, "{}", text)?;
        self.output.flush()?;
        Ok(())
    }

    fn rng(self: &mut Self) -> &mut dyn RngCore {
        &mut self.rng
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn end_of_input_is_empty_line() {
        let mut runner = Runner::with_seed(Cursor::new("only\n"), Vec::new(), 0);
        assert_eq!(runner.read_line().unwrap(), "only");
        assert_eq!(runner.read_line().unwrap(), "");
    }

    #[test]
    fn raw_reads_cross_lines() {
        let mut runner = Runner::with_seed(Cursor::new("ab\ncd"), Vec::new(), 0);
        assert_eq!(runner.read_chars(4).unwrap(), "ab\nc");
        assert_eq!(runner.read_chars(4).unwrap(), "d");
    }

    #[test]
    fn writes_lines() {
        let mut runner = Runner::with_seed(Cursor::new(""), Vec::new(), 0);
        runner.write_line("x").unwrap();
        runner.write_line("y").unwrap();
        assert_eq!(String::from_utf8(runner.output).unwrap(), "x\ny\n");
    }
}
