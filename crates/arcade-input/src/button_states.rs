/// Double-buffered boolean state for a fixed set of button codes.
///
/// `current` is overwritten once per frame from a poll; `previous` holds the
/// prior frame's `current`. Edges are derived by comparing the two, so every
/// query in a frame must come after that frame's [`ButtonStates::update`].
///
/// Slots held when [`ButtonStates::reset`] runs stay masked as released
/// until the device reports them up, so they never produce an edge.
#[derive(Debug, Clone)]
pub struct ButtonStates {
    previous: Box<[bool]>,
    current: Box<[bool]>,
    suppressed: Box<[bool]>,
}

impl ButtonStates {
    /// Create a snapshot with `count` slots, all released.
    pub fn new(count: usize) -> Self {
        Self {
            previous: vec![false; count].into_boxed_slice(),
            current: vec![false; count].into_boxed_slice(),
            suppressed: vec![false; count].into_boxed_slice(),
        }
    }

    pub fn len(&self) -> usize {
        self.current.len()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    /// Shift `current` into `previous`, then re-poll every slot.
    pub fn update(&mut self, mut poll: impl FnMut(usize) -> bool) {
        self.previous.copy_from_slice(&self.current);
        for (i, (slot, masked)) in self
            .current
            .iter_mut()
            .zip(self.suppressed.iter_mut())
            .enumerate()
        {
            let raw = poll(i);
            if *masked {
                *masked = raw;
                *slot = false;
            } else {
                *slot = raw;
            }
        }
    }

    /// Report every slot as released and swallow buttons that are still
    /// held until they are let go.
    pub fn reset(&mut self) {
        for (masked, &held) in self.suppressed.iter_mut().zip(self.current.iter()) {
            *masked |= held;
        }
        self.previous.fill(false);
        self.current.fill(false);
    }

    /// Held this frame. Out-of-range codes are never pressed.
    pub fn is_pressed(&self, code: usize) -> bool {
        self.current.get(code).copied().unwrap_or(false)
    }

    /// Went from released to held between the last two updates.
    pub fn is_down(&self, code: usize) -> bool {
        match (self.previous.get(code), self.current.get(code)) {
            (Some(&prev), Some(&cur)) => !prev && cur,
            _ => false,
        }
    }

    /// Went from held to released between the last two updates.
    pub fn is_up(&self, code: usize) -> bool {
        match (self.previous.get(code), self.current.get(code)) {
            (Some(&prev), Some(&cur)) => prev && !cur,
            _ => false,
        }
    }

    pub fn is_any_pressed(&self) -> bool {
        self.current.iter().any(|&c| c)
    }

    pub fn is_any_down(&self) -> bool {
        (0..self.len()).any(|i| self.is_down(i))
    }

    pub fn is_any_up(&self) -> bool {
        (0..self.len()).any(|i| self.is_up(i))
    }
}
