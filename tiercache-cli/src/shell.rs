use anyhow::{Context, Result, anyhow};
use colored::Colorize;
use tiercache::{CacheError, CacheHierarchy};

/// Status code for an error returned by [`Shell::execute_command`]
pub fn status_code(err: &anyhow::Error) -> &'static str {
    err.downcast_ref::<CacheError>()
        .map(CacheError::code)
        .unwrap_or("ERROR")
}

/// Command dispatcher over an owned hierarchy
pub struct Shell {
    hierarchy: CacheHierarchy<String, String>,
}

impl Shell {
    pub fn new(hierarchy: CacheHierarchy<String, String>) -> Self {
        Self { hierarchy }
    }

    pub fn level_count(&self) -> usize {
        self.hierarchy.level_count()
    }

    /// `QUIT`, `EXIT` and menu option 6 end the session
    pub fn is_exit(command: &str) -> bool {
        matches!(command.to_uppercase().as_str(), "QUIT" | "EXIT" | "6")
    }

    pub fn execute_command(&mut self, command: &str, args: &[String]) -> Result<String> {
        match command.to_uppercase().as_str() {
            "ADD" | "1" => self.cmd_add(args),
            "REMOVE" | "2" => self.cmd_remove(args),
            "PUT" | "SET" | "3" => self.cmd_put(args),
            "GET" | "4" => self.cmd_get(args),
            "DISPLAY" | "5" => self.cmd_display(args),
            "STATS" | "INFO" => self.cmd_stats(),
            "HELP" => Ok(self.help_text()),
            _ => Err(anyhow!("Unknown command: {}", command)),
        }
    }

    fn cmd_add(&mut self, args: &[String]) -> Result<String> {
        if args.len() < 2 {
            return Err(anyhow!("Usage: ADD capacity policy"));
        }

        let capacity = args[0]
            .parse::<i64>()
            .context("Capacity must be a valid number")?;
        let index = self.hierarchy.add_level(capacity, &args[1])?;

        Ok(format!(
            "Cache level {} added with size: {} and eviction policy: {}",
            index,
            capacity,
            args[1].to_uppercase()
        )
        .green()
        .to_string())
    }

    fn cmd_remove(&mut self, args: &[String]) -> Result<String> {
        if args.is_empty() {
            return Err(anyhow!("Usage: REMOVE level"));
        }

        let index = args[0]
            .parse::<usize>()
            .context("Level must be a positive number")?;
        self.hierarchy.remove_level(index)?;

        Ok(format!("Cache level {} removed.", index).green().to_string())
    }

    fn cmd_put(&mut self, args: &[String]) -> Result<String> {
        if args.len() < 2 {
            return Err(anyhow!("Usage: PUT key value"));
        }

        self.hierarchy.put(args[0].clone(), args[1].clone())?;
        Ok(format!("Inserted key: {} into all cache levels.", args[0])
            .green()
            .to_string())
    }

    fn cmd_get(&mut self, args: &[String]) -> Result<String> {
        if args.is_empty() {
            return Err(anyhow!("Usage: GET key"));
        }

        match self.hierarchy.fetch(&args[0]) {
            Ok(hit) => Ok(format!(
                "\"{}\" {}",
                hit.value,
                format!("(hit at level {})", hit.level).dimmed()
            )),
            Err(CacheError::KeyNotFound(_)) => Ok("(nil)".dimmed().to_string()),
            Err(e) => Err(e.into()),
        }
    }

    fn cmd_display(&self, args: &[String]) -> Result<String> {
        if self.hierarchy.is_empty() {
            return Ok("(no cache levels)".dimmed().to_string());
        }

        let as_json = args
            .first()
            .is_some_and(|a| a.eq_ignore_ascii_case("json"));
        if as_json {
            return serde_json::to_string_pretty(&self.hierarchy.snapshot_all())
                .context("Failed to serialize snapshot");
        }

        Ok(self.hierarchy.display())
    }

    fn cmd_stats(&self) -> Result<String> {
        let mut output = Vec::new();
        let levels = self.hierarchy.stats().into_iter().zip(self.hierarchy.policies());
        for ((index, stats), policy) in levels {
            output.push(format!("# Level {} ({})", index, policy));
            output.push(format!("hits: {}", stats.hits));
            output.push(format!("misses: {}", stats.misses));
            output.push(format!("inserts: {}", stats.inserts));
            output.push(format!("updates: {}", stats.updates));
            output.push(format!("evictions: {}", stats.evictions));
            output.push(format!("hit_rate: {:.2}%", stats.hit_rate * 100.0));
        }

        if output.is_empty() {
            return Ok("(no cache levels)".dimmed().to_string());
        }
        Ok(output.join("\n"))
    }

    fn help_text(&self) -> String {
        format!(
            r#"{}

{}
  ADD capacity policy        Append a level (policy: LRU or LFU)        [1]
  REMOVE level               Remove a level by 1-based index            [2]

{}
  PUT key value              Write value into every level               [3]
  GET key                    Read through levels, promoting on hit      [4]

{}
  DISPLAY [json]             Show every level's contents                [5]
  STATS                      Show per-level hit/miss counters
  HELP                       Show this help message
  QUIT                       Exit the CLI                               [6]
"#,
            "Tiercache CLI - Available Commands".bold().cyan(),
            "Level Commands:".bold(),
            "Data Commands:".bold(),
            "Inspection:".bold(),
        )
    }
}
