// Two-Level Tick Bitmap
//
// Compressed index c = tick / spacing. Level one stores bit (c & 127) of
// word (c >> 7); level two stores one bit per non-empty level-one word,
// indexed the same way over word indices. Searches touch at most one
// tick word per direction change plus the summary words in between.

use soroban_sdk::Env;
use tidal_math::{MAX_TICK, MIN_TICK};
use crate::store::TickStore;
use crate::types::{BitmapLevel, Direction};

#[inline]
fn position(index: i32) -> (i32, u32) {
    (index >> 7, (index & 127) as u32)
}

/// Bits 0..=bit set
#[inline]
fn mask_at_or_below(bit: u32) -> u128 {
    if bit == 127 { u128::MAX } else { (1u128 << (bit + 1)) - 1 }
}

/// Bits bit..=127 set
#[inline]
fn mask_at_or_above(bit: u32) -> u128 {
    u128::MAX << bit
}

#[inline]
fn highest_bit(word: u128) -> i32 {
    127 - word.leading_zeros() as i32
}

#[inline]
fn lowest_bit(word: u128) -> i32 {
    word.trailing_zeros() as i32
}

/// Set or clear the bitmap bit for an aligned tick
pub fn set_tick_initialized<S: TickStore>(
    env: &Env,
    store: &S,
    tick: i32,
    tick_spacing: u32,
    initialized: bool,
) {
    let compressed = tick.div_euclid(tick_spacing as i32);
    let (word_index, bit) = position(compressed);

    let word = store.read_word(env, BitmapLevel::Tick, word_index);
    let updated = if initialized {
        word | (1u128 << bit)
    } else {
        word & !(1u128 << bit)
    };
    if updated == word {
        return;
    }
    store.write_word(env, BitmapLevel::Tick, word_index, updated);

    // Summary only changes when the word flips between empty and non-empty
    if (word == 0) != (updated == 0) {
        let (summary_index, summary_bit) = position(word_index);
        let summary = store.read_word(env, BitmapLevel::Summary, summary_index);
        let summary_updated = if updated != 0 {
            summary | (1u128 << summary_bit)
        } else {
            summary & !(1u128 << summary_bit)
        };
        store.write_word(env, BitmapLevel::Summary, summary_index, summary_updated);
    }
}

/// Find the next initialized tick from `from` in the given direction
///
/// `ZeroForOne` returns the largest initialized tick <= `from`;
/// `OneForZero` returns the smallest initialized tick > `from`.
pub fn next_initialized_tick<S: TickStore>(
    env: &Env,
    store: &S,
    from: i32,
    tick_spacing: u32,
    direction: Direction,
) -> Option<i32> {
    if tick_spacing == 0 {
        return None;
    }
    let spacing = tick_spacing as i32;
    let floor = from.div_euclid(spacing);

    let compressed = match direction {
        Direction::ZeroForOne => search_down(env, store, floor, MIN_TICK.div_euclid(spacing)),
        Direction::OneForZero => search_up(env, store, floor + 1, MAX_TICK.div_euclid(spacing)),
    }?;
    Some(compressed * spacing)
}

/// Largest set compressed index <= `start`
fn search_down<S: TickStore>(env: &Env, store: &S, start: i32, min_index: i32) -> Option<i32> {
    if start < min_index {
        return None;
    }
    let (word_index, bit) = position(start);
    let word = store.read_word(env, BitmapLevel::Tick, word_index) & mask_at_or_below(bit);
    if word != 0 {
        return Some(word_index * 128 + highest_bit(word));
    }

    let (min_word, _) = position(min_index);
    if word_index - 1 < min_word {
        return None;
    }
    let (mut summary_index, summary_bit) = position(word_index - 1);
    let (min_summary, _) = position(min_word);
    let mut summary = store.read_word(env, BitmapLevel::Summary, summary_index) & mask_at_or_below(summary_bit);

    loop {
        if summary != 0 {
            let found_word = summary_index * 128 + highest_bit(summary);
            let word = store.read_word(env, BitmapLevel::Tick, found_word);
            if word == 0 {
                return None;
            }
            return Some(found_word * 128 + highest_bit(word));
        }
        summary_index -= 1;
        if summary_index < min_summary {
            return None;
        }
        summary = store.read_word(env, BitmapLevel::Summary, summary_index);
    }
}

/// Smallest set compressed index >= `start`
fn search_up<S: TickStore>(env: &Env, store: &S, start: i32, max_index: i32) -> Option<i32> {
    if start > max_index {
        return None;
    }
    let (word_index, bit) = position(start);
    let word = store.read_word(env, BitmapLevel::Tick, word_index) & mask_at_or_above(bit);
    if word != 0 {
        return Some(word_index * 128 + lowest_bit(word));
    }

    let (max_word, _) = position(max_index);
    if word_index + 1 > max_word {
        return None;
    }
    let (mut summary_index, summary_bit) = position(word_index + 1);
    let (max_summary, _) = position(max_word);
    let mut summary = store.read_word(env, BitmapLevel::Summary, summary_index) & mask_at_or_above(summary_bit);

    loop {
        if summary != 0 {
            let found_word = summary_index * 128 + lowest_bit(summary);
            let word = store.read_word(env, BitmapLevel::Tick, found_word);
            if word == 0 {
                return None;
            }
            return Some(found_word * 128 + lowest_bit(word));
        }
        summary_index += 1;
        if summary_index > max_summary {
            return None;
        }
        summary = store.read_word(env, BitmapLevel::Summary, summary_index);
    }
}
