//! Local-maximum peak picking on an onset-strength style envelope
//!
//! A frame `n` is a peak when all of the following hold:
//!
//! 1. `x[n] == max(x[n - pre_max .. n + post_max])`
//! 2. `x[n] >= mean(x[n - pre_avg .. n + post_avg]) + delta`
//! 3. more than `wait` frames have passed since the previous peak
//!
//! Windows are clipped at the signal edges.

/// Peak picker parameters (all in frames, except `delta`)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeakPicker {
    /// Frames before `n` covered by the max window
    pub pre_max: usize,
    /// Frames after `n` covered by the max window
    pub post_max: usize,
    /// Frames before `n` covered by the mean window
    pub pre_avg: usize,
    /// Frames after `n` covered by the mean window
    pub post_avg: usize,
    /// Margin above the local mean
    pub delta: f32,
    /// Frames that must pass between peaks
    pub wait: usize,
}

impl Default for PeakPicker {
    fn default() -> Self {
        Self {
            pre_max: 3,
            post_max: 3,
            pre_avg: 3,
            post_avg: 3,
            delta: 0.05,
            wait: 5,
        }
    }
}

impl PeakPicker {
    /// Indices of the peaks in `signal`, in time order
    ///
    /// # Example
    ///
    /// ```
    /// use interview_signals::features::vocal::peaks::PeakPicker;
    ///
    /// let mut signal = vec![0.0f32; 30];
    /// signal[5] = 1.0;
    /// signal[20] = 0.8;
    /// assert_eq!(PeakPicker::default().pick(&signal), vec![5, 20]);
    /// ```
    pub fn pick(&self, signal: &[f32]) -> Vec<usize> {
        let n = signal.len();
        let mut peaks: Vec<usize> = Vec::new();

        for i in 0..n {
            let max_start = i.saturating_sub(self.pre_max);
            let max_end = (i + self.post_max.max(1)).min(n);
            let local_max = signal[max_start..max_end]
                .iter()
                .copied()
                .fold(f32::NEG_INFINITY, f32::max);
            if signal[i] < local_max {
                continue;
            }

            let avg_start = i.saturating_sub(self.pre_avg);
            let avg_end = (i + self.post_avg.max(1)).min(n);
            let window = &signal[avg_start..avg_end];
            let local_mean = window.iter().sum::<f32>() / window.len() as f32;
            if signal[i] < local_mean + self.delta {
                continue;
            }

            if let Some(&last) = peaks.last() {
                if i - last <= self.wait {
                    continue;
                }
            }
            peaks.push(i);
        }

        log::debug!("Picked {} peaks from {} frames", peaks.len(), n);
        peaks
    }
}
