//! ID 与时间工具

use std::sync::OnceLock;
use std::sync::atomic::{AtomicI64, Ordering};

/// 2024-01-01 00:00:00 UTC
const ID_EPOCH_MS: i64 = 1_704_067_200_000;
const SEQUENCE_BITS: u32 = 12;
const SEQUENCE_MASK: i64 = (1 << SEQUENCE_BITS) - 1;
const TIMESTAMP_MASK: i64 = (1 << 41) - 1;

/// 获取当前 UTC 时间戳（毫秒）
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Snowflake-style resource id: 41 bits of milliseconds since [`ID_EPOCH_MS`]
/// followed by a 12-bit sequence, 53 bits total so it survives a round trip
/// through a JavaScript number.
///
/// The sequence is process-wide and starts at a random offset, so ids minted
/// in the same millisecond by one process never repeat (up to 4096) and two
/// processes are unlikely to line up. The primary key is still the final
/// guard.
pub fn snowflake_id() -> i64 {
    static SEQUENCE: OnceLock<AtomicI64> = OnceLock::new();
    let seq = SEQUENCE
        .get_or_init(|| AtomicI64::new(rand::random::<u16>() as i64))
        .fetch_add(1, Ordering::Relaxed)
        & SEQUENCE_MASK;
    let ts = (now_millis() - ID_EPOCH_MS) & TIMESTAMP_MASK;
    (ts << SEQUENCE_BITS) | seq
}
