use crate::error::{
    CoreError, DIVIDE_BY_ZERO, INVALID_TICK_ARRAY_SEQUENCE, INVALID_TICK_INDEX,
    TICK_ARRAY_NOT_EVENLY_SPACED, TICK_INDEX_OUT_OF_BOUNDS, TICK_SEQUENCE_EMPTY,
};
use crate::math::tick_math::{MAX_TICK_INDEX, MIN_TICK_INDEX};
use crate::state::tick::Tick;
use crate::state::tick_array::{TICK_ARRAY_SIZE, TickArray};
use crate::state_math::tick::{
    get_initializable_tick_index, get_next_initializable_tick_index,
    get_prev_initializable_tick_index,
};

/// A run of adjacent tick arrays a swap walks through, sorted ascending by
/// start tick. Trailing `None` entries shorten the window; gaps are rejected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TickArraySequence<const SIZE: usize> {
    pub tick_arrays: [Option<TickArray>; SIZE],
    pub tick_spacing: u16,
}

impl<const SIZE: usize> TickArraySequence<SIZE> {
    pub fn new(
        tick_arrays: [Option<TickArray>; SIZE],
        tick_spacing: u16,
    ) -> Result<Self, CoreError> {
        if tick_spacing == 0 {
            return Err(DIVIDE_BY_ZERO);
        }

        let mut tick_arrays = tick_arrays;
        tick_arrays.sort_by_key(start_tick_index);

        if tick_arrays.is_empty() || tick_arrays[0].is_none() {
            return Err(TICK_SEQUENCE_EMPTY);
        }

        let required_spacing = TICK_ARRAY_SIZE as i32 * tick_spacing as i32;
        for window in tick_arrays.windows(2) {
            let next_start = start_tick_index(&window[1]);
            if next_start != i32::MAX
                && next_start - start_tick_index(&window[0]) != required_spacing
            {
                return Err(TICK_ARRAY_NOT_EVENLY_SPACED);
            }
        }

        Ok(Self {
            tick_arrays,
            tick_spacing,
        })
    }

    /// First valid tick index covered by the sequence.
    pub fn start_index(&self) -> i32 {
        start_tick_index(&self.tick_arrays[0]).max(MIN_TICK_INDEX)
    }

    /// Last valid tick index covered by the sequence.
    pub fn end_index(&self) -> i32 {
        let mut last_valid_start = self.start_index();
        for tick_array in &self.tick_arrays {
            let start = start_tick_index(tick_array);
            if start != i32::MAX {
                last_valid_start = start;
            }
        }
        let end = last_valid_start + TICK_ARRAY_SIZE as i32 * self.tick_spacing as i32 - 1;
        end.min(MAX_TICK_INDEX)
    }

    pub fn tick(&self, tick_index: i32) -> Result<&Tick, CoreError> {
        if tick_index < self.start_index() || tick_index > self.end_index() {
            return Err(TICK_INDEX_OUT_OF_BOUNDS);
        }
        if tick_index % self.tick_spacing as i32 != 0 {
            return Err(INVALID_TICK_INDEX);
        }
        let first_start = start_tick_index(&self.tick_arrays[0]);
        let array_index = ((tick_index - first_start)
            / (TICK_ARRAY_SIZE as i32 * self.tick_spacing as i32)) as usize;
        let Some(tick_array) = &self.tick_arrays[array_index] else {
            return Err(INVALID_TICK_ARRAY_SEQUENCE);
        };
        let index_in_array =
            ((tick_index - tick_array.start_tick_index) / self.tick_spacing as i32) as usize;
        Ok(&tick_array.ticks[index_in_array])
    }

    /// Next initialized tick strictly above `tick_index`. Returns
    /// `(None, end_index)` when the sequence runs out, so the caller can
    /// terminate at the last covered price.
    pub fn next_initialized_tick(
        &self,
        tick_index: i32,
    ) -> Result<(Option<&Tick>, i32), CoreError> {
        let end_index = self.end_index();
        if tick_index >= end_index {
            return Err(INVALID_TICK_ARRAY_SEQUENCE);
        }
        let mut next_index = tick_index;
        loop {
            next_index = get_next_initializable_tick_index(next_index, self.tick_spacing)?;
            if next_index > end_index {
                return Ok((None, end_index));
            }
            let tick = self.tick(next_index)?;
            if tick.initialized {
                return Ok((Some(tick), next_index));
            }
        }
    }

    /// Previous initialized tick at or below `tick_index`. Returns
    /// `(None, start_index)` when the sequence runs out.
    pub fn prev_initialized_tick(
        &self,
        tick_index: i32,
    ) -> Result<(Option<&Tick>, i32), CoreError> {
        let start_index = self.start_index();
        if tick_index < start_index {
            return Err(INVALID_TICK_ARRAY_SEQUENCE);
        }
        let mut prev_index =
            get_initializable_tick_index(tick_index, self.tick_spacing, Some(false))?;
        loop {
            if prev_index < start_index {
                return Ok((None, start_index));
            }
            let tick = self.tick(prev_index)?;
            if tick.initialized {
                return Ok((Some(tick), prev_index));
            }
            prev_index = get_prev_initializable_tick_index(prev_index, self.tick_spacing)?;
        }
    }
}

// internal functions

fn start_tick_index(tick_array: &Option<TickArray>) -> i32 {
    if let Some(tick_array) = tick_array {
        tick_array.start_tick_index
    } else {
        i32::MAX
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn array_with_ticks(start: i32, spacing: u16, initialized_at: &[i32]) -> TickArray {
        let mut array = TickArray::uninitialized(start);
        for &tick_index in initialized_at {
            let slot = ((tick_index - start) / spacing as i32) as usize;
            array.ticks[slot] = Tick {
                initialized: true,
                liquidity_net: 100,
                liquidity_gross: 100,
            };
        }
        array
    }

    #[test]
    fn test_rejects_zero_tick_spacing() {
        let array = TickArray::uninitialized(0);
        assert_eq!(
            TickArraySequence::new([Some(array), None, None], 0),
            Err(DIVIDE_BY_ZERO)
        );
    }

    #[test]
    fn test_rejects_empty_and_uneven() {
        assert_eq!(
            TickArraySequence::<3>::new([None, None, None], 64),
            Err(TICK_SEQUENCE_EMPTY)
        );

        // gap of two array spans between the members
        let a = TickArray::uninitialized(0);
        let b = TickArray::uninitialized(2 * 5632);
        assert_eq!(
            TickArraySequence::new([Some(a), Some(b), None], 64),
            Err(TICK_ARRAY_NOT_EVENLY_SPACED)
        );
    }

    #[test]
    fn test_sorts_and_spans() {
        let low = TickArray::uninitialized(-5632);
        let mid = TickArray::uninitialized(0);
        let sequence = TickArraySequence::new([Some(mid), Some(low), None], 64).unwrap();
        assert_eq!(sequence.start_index(), -5632);
        assert_eq!(sequence.end_index(), 5631);
    }

    #[test]
    fn test_next_initialized_walks_up() {
        let array = array_with_ticks(0, 64, &[128, 1024]);
        let sequence = TickArraySequence::new([Some(array), None, None], 64).unwrap();

        let (tick, index) = sequence.next_initialized_tick(0).unwrap();
        assert!(tick.is_some());
        assert_eq!(index, 128);

        let (tick, index) = sequence.next_initialized_tick(128).unwrap();
        assert!(tick.is_some());
        assert_eq!(index, 1024);

        // nothing beyond 1024: terminate at the sequence boundary
        let (tick, index) = sequence.next_initialized_tick(1024).unwrap();
        assert!(tick.is_none());
        assert_eq!(index, sequence.end_index());

        assert!(sequence.next_initialized_tick(sequence.end_index()).is_err());
    }

    #[test]
    fn test_prev_initialized_walks_down() {
        let array = array_with_ticks(-5632, 64, &[-5632 + 64, -128]);
        let sequence = TickArraySequence::new([Some(array), None, None], 64).unwrap();

        let (tick, index) = sequence.prev_initialized_tick(-64).unwrap();
        assert!(tick.is_some());
        assert_eq!(index, -128);

        // inclusive at the probe tick
        let (tick, index) = sequence.prev_initialized_tick(-128).unwrap();
        assert!(tick.is_some());
        assert_eq!(index, -128);

        let (tick, index) = sequence.prev_initialized_tick(-256).unwrap();
        assert!(tick.is_some());
        assert_eq!(index, -5632 + 64);

        let (tick, index) = sequence.prev_initialized_tick(-5632 + 63).unwrap();
        assert!(tick.is_none());
        assert_eq!(index, sequence.start_index());
    }
}
