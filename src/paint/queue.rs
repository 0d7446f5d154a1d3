//! Serialized processing of brush samples.

use std::collections::VecDeque;

use crate::geometry::BrushSample;

/// FIFO of pending samples with a single consumer.
///
/// Samples are applied strictly in arrival order and one at a time. A drain
/// requested while another drain is running returns immediately; the running
/// drain picks up anything enqueued in the meantime.
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    pending: VecDeque<BrushSample>,
    processing: bool,
}

impl EventQueue {
    pub fn enqueue(&mut self, sample: BrushSample) {
        self.pending.push_back(sample);
    }

    /// Pop and apply samples until the queue is empty.
    ///
    /// Returns how many samples this call applied.
    pub fn drain(&mut self, mut apply: impl FnMut(BrushSample)) -> usize {
        if self.processing {
            return 0;
        }

        self.processing = true;
        let mut applied = 0;
        while let Some(sample) = self.pending.pop_front() {
            apply(sample);
            applied += 1;
        }
        self.processing = false;

        applied
    }

    /// Drop every pending sample and reset the processing flag
    pub fn cancel(&mut self) {
        self.pending.clear();
        self.processing = false;
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn is_processing(&self) -> bool {
        self.processing
    }
}
