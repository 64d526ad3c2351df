//! Run segmentation.
//!
//! Splits input into alternating repeated-value and unique-value runs.
//! The scan stops one byte short of the end; that trailing byte is folded
//! into the last run when it can take it.

/// A typed span of the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Run {
    /// `repeats` consecutive copies of `value` (always at least 2).
    Repeated {
        /// The repeated byte.
        value: u8,
        /// Number of copies.
        repeats: usize,
    },
    /// Bytes where neighbours differ.
    Unique(Vec<u8>),
}

impl Run {
    /// Number of input bytes this run covers.
    pub fn len(&self) -> usize {
        match self {
            Self::Repeated { repeats, .. } => *repeats,
            Self::Unique(values) => values.len(),
        }
    }

    /// Whether the run covers no bytes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append the bytes this run stands for.
    pub fn expand_into(&self, out: &mut Vec<u8>) {
        match self {
            Self::Repeated { value, repeats } => out.resize(out.len() + repeats, *value),
            Self::Unique(values) => out.extend_from_slice(values),
        }
    }

    /// Take a trailing byte onto the end of this run.
    ///
    /// Repeated runs refuse; unique runs always accept, even a byte equal
    /// to their last one.
    fn absorb_last(&mut self, value: u8) -> bool {
        match self {
            Self::Repeated { .. } => false,
            Self::Unique(values) => {
                values.push(value);
                true
            }
        }
    }
}

/// Partition `data` into runs whose concatenation is `data`.
pub fn segment(data: &[u8]) -> Vec<Run> {
    let len = data.len();
    let mut runs = Vec::new();
    if len == 0 {
        return runs;
    }

    let mut i = 0;
    while i < len - 1 {
        let mut cnt = 0;
        while i < len - 1 && data[i] == data[i + 1] {
            cnt += 1;
            i += 1;
        }

        if cnt > 0 {
            runs.push(Run::Repeated {
                value: data[i],
                repeats: cnt + 1,
            });
            i += 1;
        } else {
            let start = i;
            while i < len - 1 && data[i] != data[i + 1] {
                i += 1;
            }
            if i > start {
                runs.push(Run::Unique(data[start..i].to_vec()));
            }
        }
    }

    if i != len {
        let last = data[len - 1];
        let folded = runs.last_mut().is_some_and(|run| run.absorb_last(last));
        if !folded {
            runs.push(Run::Unique(vec![last]));
        }
    }

    runs
}

/// Concatenate the bytes a run sequence stands for.
pub fn expand(runs: &[Run]) -> Vec<u8> {
    let mut out = Vec::with_capacity(runs.iter().map(Run::len).sum());
    for run in runs {
        run.expand_into(&mut out);
    }
    out
}
