use anyhow::{Context, Result, bail};
use codered_game::{decode_to_seed, replay_code};
use std::collections::HashSet;

/// A seed to play, plus the replay code it came from (if any).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedInfo {
    pub seed: u64,
    pub code: Option<String>,
}

impl SeedInfo {
    #[must_use]
    pub const fn from_numeric(seed: u64) -> Self {
        Self { seed, code: None }
    }

    #[must_use]
    pub const fn from_code(seed: u64, code: String) -> Self {
        Self {
            seed,
            code: Some(code),
        }
    }

    /// Replay code players would type for this seed, or the raw seed when no
    /// code reproduces it.
    #[must_use]
    pub fn display_code(&self) -> String {
        self.code
            .clone()
            .or_else(|| replay_code(self.seed))
            .unwrap_or_else(|| self.seed.to_string())
    }

    /// Seed for the `iteration`-th repeat of this entry.
    #[must_use]
    pub const fn iteration_seed(&self, iteration: usize) -> u64 {
        self.seed.wrapping_add(iteration as u64)
    }
}

/// Resolve CLI seed tokens: integers (negative values use their magnitude),
/// replay codes, and `all` for every code on the word list with suffix `00`.
///
/// # Errors
///
/// Fails on a token that is neither a number nor a valid replay code.
pub fn resolve_seed_inputs(tokens: &[String]) -> Result<Vec<SeedInfo>> {
    let mut pending: Vec<SeedInfo> = Vec::new();

    for token in tokens {
        if token.is_empty() {
            continue;
        }

        if token.eq_ignore_ascii_case("all") {
            pending.extend(word_list_seeds()?);
            continue;
        }

        if let Ok(value) = token.parse::<i64>() {
            pending.push(SeedInfo::from_numeric(value.unsigned_abs()));
            continue;
        }

        if let Ok(value) = token.parse::<u64>() {
            pending.push(SeedInfo::from_numeric(value));
            continue;
        }

        if let Some(seed) = decode_to_seed(token) {
            pending.push(SeedInfo::from_code(seed, token.trim().to_uppercase()));
            continue;
        }

        bail!("Unrecognized seed token: {token}");
    }

    let mut seen = HashSet::new();
    pending.retain(|info| seen.insert(info.seed));

    if pending.is_empty() {
        pending.push(SeedInfo::from_numeric(1337));
    }

    Ok(pending)
}

fn word_list_seeds() -> Result<Vec<SeedInfo>> {
    use codered_game::seed::WORD_LIST;

    WORD_LIST
        .iter()
        .map(|word| {
            let code = format!("ER-{word}00");
            let seed =
                decode_to_seed(&code).with_context(|| format!("failed to parse code: {code}"))?;
            Ok(SeedInfo::from_code(seed, code))
        })
        .collect()
}
