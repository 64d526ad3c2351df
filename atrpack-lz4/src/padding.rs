//! Bank gap padding.
//!
//! The LZ4 routine writes its output linearly, so the gap the
//! [`AddressStepper`] would skip is baked into the data before packing:
//! zeros are inserted at the bank boundary when the data runs past it.
//!
//! [`AddressStepper`]: atrpack_core::AddressStepper

use atrpack_core::StepperConfig;

/// Length of `len` bytes of data once padded.
pub fn padded_len(len: usize, stepper: &StepperConfig) -> usize {
    if len > stepper.bank_bytes() {
        len.saturating_add(stepper.gap_bytes as usize)
    } else {
        len
    }
}

/// Insert the gap after the first bank.
pub fn pad_for_banks(data: &[u8], stepper: &StepperConfig) -> Vec<u8> {
    let bank = stepper.bank_bytes();
    let mut out = Vec::with_capacity(padded_len(data.len(), stepper));
    if data.len() > bank {
        out.extend_from_slice(&data[..bank]);
        out.resize(bank + stepper.gap_bytes as usize, 0);
        out.extend_from_slice(&data[bank..]);
    } else {
        out.extend_from_slice(data);
    }
    out
}

/// Remove the gap [`pad_for_banks`] inserted, given the original length.
pub fn strip_bank_padding(padded: &[u8], original_len: usize, stepper: &StepperConfig) -> Vec<u8> {
    let bank = stepper.bank_bytes();
    if original_len > bank {
        let resume = bank + stepper.gap_bytes as usize;
        let mut out = Vec::with_capacity(original_len);
        out.extend_from_slice(&padded[..bank]);
        out.extend_from_slice(&padded[resume..]);
        out
    } else {
        padded.to_vec()
    }
}
