//! Interactive session: forest list, current-forest pointer, and menu loop
//!
//! The loop reads one command character per iteration and applies it to the
//! current forest (or the forest list itself for load/next/exit). All input
//! and output go through caller-supplied handles so the whole session can be
//! driven by scripted transcripts in tests.

use std::io::{BufRead, Write};

use rand::Rng;
use tracing::debug;

use crate::application::services::generator::TreeGenerator;
use crate::application::services::persistence::{ForestStore, MalformedLine, SourceLoad};
use crate::application::ApplicationResult;
use crate::domain::Forest;

const MENU: &str = "(P)rint, (A)dd, (C)ut, (G)row, (R)eap, (S)ave, (L)oad, (N)ext, e(X)it : ";

/// One interactive run over a list of loaded forests.
pub struct Session<R: Rng> {
    store: ForestStore,
    generator: TreeGenerator,
    rng: R,
    /// Startup source names, in argument order. Also the basis of the
    /// session-ending guard: the loop exits once the current index reaches
    /// this count, even though the live forest list may be longer.
    sources: Vec<String>,
    forests: Vec<Forest>,
    current: usize,
    /// Index into `sources` of the most recently loaded source; the Next
    /// command cycles onward from here.
    source_cursor: usize,
}

impl<R: Rng> Session<R> {
    pub fn new(store: ForestStore, generator: TreeGenerator, rng: R, sources: Vec<String>) -> Self {
        Self {
            store,
            generator,
            rng,
            sources,
            forests: Vec::new(),
            current: 0,
            source_cursor: 0,
        }
    }

    pub fn forests(&self) -> &[Forest] {
        &self.forests
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Load every startup source, appending one forest per name.
    ///
    /// A source that cannot be read yields an empty forest with the requested
    /// name; a malformed line keeps the trees parsed before it. Both are
    /// reported but never abort startup.
    pub fn bootstrap(&mut self, out: &mut impl Write) -> ApplicationResult<()> {
        writeln!(out, "Welcome to the Forestry Simulation")?;
        writeln!(out, "----------------------------------")?;

        let names = self.sources.clone();
        for name in &names {
            match self.store.load_source(name) {
                Ok(load) => self.push_source_load(name, load, out)?,
                Err(e) => {
                    writeln!(out, "{e}")?;
                    self.forests.push(Forest::new(name.clone()));
                }
            }
        }
        if let Some(first) = names.first() {
            writeln!(out, "Initializing from {first}")?;
        }
        Ok(())
    }

    /// Run the menu loop until exit, exhaustion, or end of input.
    pub fn run(&mut self, input: &mut impl BufRead, out: &mut impl Write) -> ApplicationResult<()> {
        loop {
            // Guard against the startup source count, not the live list
            // length; the two diverge because Next appends.
            if self.current >= self.sources.len() {
                writeln!(out, "No more forests available. Exiting program.")?;
                return Ok(());
            }

            write!(out, "{MENU}")?;
            out.flush()?;
            let Some(line) = read_line(input)? else {
                return Ok(());
            };
            let Some(choice) = line.trim().chars().next() else {
                continue;
            };
            debug!("command: {}", choice);

            match choice.to_ascii_uppercase() {
                'P' => self.forests[self.current].write_summary(out)?,
                'A' => {
                    let tree = self.generator.generate(&mut self.rng);
                    self.forests[self.current].add_tree(tree);
                }
                'C' => self.cut(input, out)?,
                'G' => self.forests[self.current].grow_all(),
                'R' => self.reap(input, out)?,
                'S' => self.save(out)?,
                'L' => self.load(input, out)?,
                'N' => {
                    if !self.next(out)? {
                        return Ok(());
                    }
                }
                'X' => return Ok(()),
                _ => writeln!(out, "Invalid menu option, try again")?,
            }
        }
    }

    /// Cut command: prompt for an index and remove that tree.
    fn cut(&mut self, input: &mut impl BufRead, out: &mut impl Write) -> ApplicationResult<()> {
        write!(out, "Tree number to cut down: ")?;
        out.flush()?;
        let Some(line) = read_line(input)? else {
            return Ok(());
        };
        match line.trim().parse::<i64>() {
            Ok(index) => {
                if let Err(e) = self.forests[self.current].remove_tree(index) {
                    writeln!(out, "{e}")?;
                }
            }
            Err(_) => writeln!(out, "That is not an integer")?,
        }
        Ok(())
    }

    /// Reap command: prompt for a threshold and cull everything above it.
    fn reap(&mut self, input: &mut impl BufRead, out: &mut impl Write) -> ApplicationResult<()> {
        write!(out, "Height threshold to reap trees: ")?;
        out.flush()?;
        let Some(line) = read_line(input)? else {
            return Ok(());
        };
        match line.trim().parse::<f64>() {
            Ok(threshold) => {
                let reaped = self.forests[self.current].reap_above(threshold);
                debug!("reaped {} trees above {}", reaped, threshold);
                writeln!(out, "Trees above {threshold} feet reaped.")?;
            }
            Err(_) => writeln!(out, "Invalid input for height threshold.")?,
        }
        Ok(())
    }

    /// Save command: snapshot the current forest to disk.
    fn save(&mut self, out: &mut impl Write) -> ApplicationResult<()> {
        match self.store.save_snapshot(&self.forests[self.current]) {
            Ok(_) => writeln!(out, "Forest saved successfully.")?,
            Err(e) => writeln!(out, "Error occurred while saving the forest: {e}")?,
        }
        Ok(())
    }

    /// Load command: read a snapshot and append it to the session list.
    /// The current index is deliberately left unchanged.
    fn load(&mut self, input: &mut impl BufRead, out: &mut impl Write) -> ApplicationResult<()> {
        write!(out, "Enter the name of the forest to load: ")?;
        out.flush()?;
        let Some(name) = read_line(input)? else {
            return Ok(());
        };
        match self.store.load_snapshot(name.trim()) {
            Ok(forest) => {
                self.forests.push(forest);
                writeln!(out, "Forest loaded successfully.")?;
            }
            Err(e) => writeln!(out, "Error occurred while loading the forest: {e}")?,
        }
        Ok(())
    }

    /// Next command: cycle through the startup sources and append the next
    /// loadable one as a new forest, making it current.
    ///
    /// Returns `false` when a full cycle fails and the session must end.
    fn next(&mut self, out: &mut impl Write) -> ApplicationResult<bool> {
        writeln!(out, "Moving to the next forest")?;
        let count = self.sources.len();
        for step in 1..=count {
            let idx = (self.source_cursor + step) % count;
            let name = self.sources[idx].clone();
            writeln!(out, "Initializing from {name}")?;
            match self.store.load_source(&name) {
                Ok(load) => {
                    self.push_source_load(&name, load, out)?;
                    self.current = self.forests.len() - 1;
                    self.source_cursor = idx;
                    writeln!(out)?;
                    return Ok(true);
                }
                Err(e) => writeln!(out, "{e}")?,
            }
        }
        writeln!(out, "No valid forests could be loaded. Exiting program.")?;
        Ok(false)
    }

    fn push_source_load(
        &mut self,
        name: &str,
        load: SourceLoad,
        out: &mut impl Write,
    ) -> ApplicationResult<()> {
        if let Some(MalformedLine { line_no, reason }) = load.malformed {
            writeln!(
                out,
                "Error occurred while parsing {name}.csv line {line_no}: {reason}"
            )?;
        }
        self.forests.push(load.forest);
        Ok(())
    }
}

/// Read one line, without its terminator. `None` means end of input.
fn read_line(input: &mut impl BufRead) -> std::io::Result<Option<String>> {
    let mut buf = String::new();
    if input.read_line(&mut buf)? == 0 {
        return Ok(None);
    }
    while buf.ends_with('\n') || buf.ends_with('\r') {
        buf.pop();
    }
    Ok(Some(buf))
}
