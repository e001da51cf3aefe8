use anyhow::Result;
use std::{fmt::Display, io::Write, str::FromStr};
use tokio::runtime::Handle;
use tracing::trace;

/// A stdin scanner to collect user input on command line.
pub struct Scanner {
    rx: tokio::sync::mpsc::Receiver<String>,
}

impl Scanner {
    /// Create a new scanner.
    pub fn new(runtime: Handle) -> Self {
        let (tx, rx) = tokio::sync::mpsc::channel(1);
        std::thread::spawn(move || {
            let stdin = std::io::stdin();
            let mut line_buf = String::new();
            // Stop at end of input, which closes the channel.
            while let Ok(1..) = stdin.read_line(&mut line_buf) {
                let line = line_buf.trim().to_string();
                line_buf.clear();
                if runtime.block_on(tx.send(line)).is_err() {
                    break;
                }
            }
            trace!("stdin closed");
        });
        Self { rx }
    }

    /// Prompt the user for an answer and collect it.
    pub async fn prompt(
        &mut self,
        prompt: impl Display,
        type_hint: impl Display,
    ) -> Result<Option<String>> {
        std::io::stdout()
            .write_all(format!("{} ~ ({}) > ", prompt, type_hint).as_bytes())?;
        std::io::stdout().flush()?;

        match self.rx.recv().await {
            Some(line) => match line.to_lowercase().trim() {
                "exit" | "quit" => {
                    anyhow::bail!("aborted")
                }
                "" => Ok(None),
                _ => Ok(Some(line.trim().to_owned())),
            },
            None => {
                println!();
                anyhow::bail!("aborted: end of input")
            }
        }
    }

    /// Prompt the user for a yes (true) or no (false).
    pub async fn prompt_yes_or_no(
        &mut self,
        prompt: impl Display,
        type_hint: impl Display,
    ) -> Result<Option<bool>> {
        let answer = loop {
            match Self::prompt(self, &prompt, &type_hint).await? {
                Some(input) => match input.to_lowercase().as_str() {
                    "y" | "yes" => break Some(true),
                    "n" | "no" => break Some(false),
                    _ => {
                        println!(
                            "Error parsing input. Expected 'yes' or 'no'. Try again."
                        );
                        continue;
                    }
                },
                None => break None,
            }
        };
        Ok(answer)
    }

    /// Prompt the user for a type and collect it.
    pub async fn prompt_t<T>(
        &mut self,
        prompt: impl Display,
        type_hint: impl Display,
    ) -> Result<Option<T>>
    where
        T: FromStr,
    {
        let t = loop {
            match self.prompt(&prompt, &type_hint).await? {
                Some(input) => match input.parse::<T>() {
                    Ok(pb) => break Some(pb),
                    _ => {
                        println!(
                            "Error parsing input. Expected '{}'. Try again.",
                            std::any::type_name::<T>()
                        );
                        continue;
                    }
                },
                None => break None,
            }
        };
        Ok(t)
    }

    /// Prompt the user to pick from a numbered menu.
    ///
    /// `0` picks every option and yields `None`. Out of range or malformed
    /// answers are asked again.
    pub async fn prompt_menu<T>(
        &mut self,
        prompt: impl Display,
        options: &[T],
        all_label: impl Display,
    ) -> Result<Option<usize>>
    where
        T: Display,
    {
        loop {
            println!("[0] {}", all_label);
            for (i, option) in options.iter().enumerate() {
                println!("[{}] {}", i + 1, option);
            }
            match self.prompt_t::<usize>(&prompt, "number").await? {
                Some(0) => return Ok(None),
                Some(idx) if idx <= options.len() => return Ok(Some(idx - 1)),
                Some(idx) => {
                    println!("Invalid selection {}. Try again.", idx);
                }
                None => {}
            }
        }
    }
}

impl Drop for Scanner {
    /// Close communication and drop the scanner, which may result in lost
    /// messages.
    fn drop(&mut self) {
        self.rx.close();
    }
}
