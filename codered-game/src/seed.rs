//! Replay codes for shifts.
//!
//! Format: `ER-<WORD><NN>`, e.g. `ER-INSULIN42`. Decoding a code yields a seed
//! whose low bits re-encode to the same code, so a code round-trips through
//! the seed it produced.

const CODE_PREFIX: &str = "ER";

pub const WORD_LIST: [&str; 64] = [
    "INSULIN", "GLUCOSE", "CORTISOL", "THYROID", "ADRENAL", "PITUITARY", "KETONE", "SODIUM",
    "POTASSIUM", "CALCIUM", "STEROID", "PULSE", "TRIAGE", "CRASH", "MONITOR", "SALINE", "DRIP",
    "BOLUS", "STAT", "CODE", "SHOCK", "VITALS", "PAGER", "GURNEY", "SUTURE", "SCALPEL", "PLASMA",
    "ATRIUM", "VENTRICLE", "AORTA", "LACTATE", "ANION", "OSMOLAR", "TETANY", "GOITER", "STORM",
    "CRISIS", "COMA", "DELIRIUM", "FEVER", "TREMOR", "PALLOR", "FLUSH", "RALES", "MURMUR",
    "CUFF", "LINE", "PORT", "CATHETER", "OXYGEN", "AIRWAY", "INTUBATE", "DEFIB", "CHART",
    "ROUNDS", "RESIDENT", "INTERN", "ATTENDING", "NURSE", "CONSULT", "ADMIT", "DISCHARGE",
    "NIGHTSHIFT", "PAGEOUT",
];

fn fnv1a64(bytes: &[u8]) -> u64 {
    const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const FNV_PRIME: u64 = 0x0100_0000_01b3;
    bytes.iter().fold(FNV_OFFSET, |hash, b| {
        (hash ^ u64::from(*b)).wrapping_mul(FNV_PRIME)
    })
}

// Low 16 bits of a seed: 6-bit word index, 7-bit number.
#[inline]
fn pack(word_index: u16, nn: u8) -> u16 {
    (word_index & 0x3F) | ((u16::from(nn) & 0x7F) << 6)
}

#[inline]
fn unpack(packed: u16) -> (u16, u8) {
    let nn = u8::try_from((packed >> 6) & 0x7F).unwrap_or(0);
    (packed & 0x3F, nn)
}

fn compose_seed(word_index: u16, nn: u8) -> u64 {
    let packed = pack(word_index, nn);
    let mut buf = [0u8; 11];
    buf[..8].copy_from_slice(b"CODERED-");
    buf[8..10].copy_from_slice(&packed.to_le_bytes());
    buf[10] = 0x5A;
    (fnv1a64(&buf) & 0xFFFF_FFFF_FFFF_0000) | u64::from(packed)
}

/// Render the replay code for `seed`.
#[must_use]
pub fn encode_friendly(seed: u64) -> String {
    let packed = u16::try_from(seed & 0xFFFF).unwrap_or(0);
    let (wi, nn) = unpack(packed);
    let word = WORD_LIST.get(usize::from(wi)).copied().unwrap_or(WORD_LIST[0]);
    format!("{CODE_PREFIX}-{word}{:02}", nn % 100)
}

/// Replay code for `seed`, but only when typing it back reproduces `seed`.
///
/// Codes carry 13 bits, so arbitrary numeric seeds have no code of their own.
#[must_use]
pub fn replay_code(seed: u64) -> Option<String> {
    let code = encode_friendly(seed);
    (decode_to_seed(&code) == Some(seed)).then_some(code)
}

/// Parse a replay code (case-insensitive) back into a seed.
#[must_use]
pub fn decode_to_seed(code: &str) -> Option<u64> {
    let (prefix, rest) = code.trim().split_once('-')?;
    if !prefix.eq_ignore_ascii_case(CODE_PREFIX) || rest.len() < 3 {
        return None;
    }
    let (word_part, nn_part) = rest.split_at_checked(rest.len() - 2)?;
    if !nn_part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let nn: u8 = nn_part.parse().ok()?;
    let word = word_part.to_ascii_uppercase();
    let idx = WORD_LIST.iter().position(|w| *w == word)?;
    let wi = u16::try_from(idx).ok()?;
    Some(compose_seed(wi, nn))
}

/// Fresh replay code from arbitrary entropy (e.g. wall-clock millis).
#[must_use]
pub fn generate_code_from_entropy(entropy: u64) -> String {
    let wi = u16::try_from(entropy % WORD_LIST.len() as u64).unwrap_or(0);
    let nn = u8::try_from((entropy >> 17) % 100).unwrap_or(0);
    encode_friendly(compose_seed(wi, nn))
}
