//! 6502 unpack routine for the command stream.
//!
//! Before `jsr unpack` the caller loads `ATR_SRC` with the packed data
//! address, `ATR_DST` with the destination and `ATR_LEN` with the
//! unpacked length. The routine mirrors [`AddressStepper`]: after
//! `BANK_LINES` rows of `LINE_BYTES` it skips `GAP_BYTES`, once.
//!
//! [`AddressStepper`]: atrpack_core::AddressStepper

use atrpack_core::{DecodeRoutine, StepperConfig, Variant, ZeroPage};

/// Procedure label of the routine.
pub const LABEL: &str = "unpack";

const BODY: &str = r#"
		.proc unpack
		ldy #0
		sty ATR_TMP_L		; column
		sty ATR_TMP_H		; line, bit 7 set once the gap is behind us
next	lda ATR_LEN_L
		ora ATR_LEN_H
		bne fetch
		rts

fetch	jsr getsrc		; command byte
		bmi valcmd
		tax			; 0nnnnnnn: n zeros, 0 means 128
		bne zeros
		ldx #128
zeros	tya
		jsr putbyte
		dex
		bne zeros
		beq next

valcmd	cmp #%11000000
		bcs literal
		and #%00111111		; 10nnnnnn: next byte n times
		bne rcount
		lda #64
rcount	tax
		jsr getsrc
repeat	jsr putbyte
		dex
		bne repeat
		beq next

literal	and #%00111111		; 11nnnnnn: n bytes as they are
		bne lcount
		lda #64
lcount	tax
copy	jsr getsrc
		jsr putbyte
		dex
		bne copy
		beq next

getsrc	lda (ATR_SRC_L),y
		inc ATR_SRC_L
		bne getsrc1
		inc ATR_SRC_H
getsrc1	ora #0
		rts

putbyte	sta (ATR_DST_L),y
		pha
		inc ATR_DST_L
		bne put1
		inc ATR_DST_H
put1	lda ATR_LEN_L
		bne put2
		dec ATR_LEN_H
put2	dec ATR_LEN_L
		inc ATR_TMP_L
		lda ATR_TMP_L
		cmp #LINE_BYTES
		bne put3
		sty ATR_TMP_L
		lda ATR_TMP_H
		bmi put3
		inc ATR_TMP_H
		lda ATR_TMP_H
		cmp #BANK_LINES
		bne put3
		clc
		lda ATR_DST_L
		adc #<GAP_BYTES
		sta ATR_DST_L
		lda ATR_DST_H
		adc #>GAP_BYTES
		sta ATR_DST_H
		lda #$80
		sta ATR_TMP_H
put3	pla
		rts
		.endp
"#;

/// Build the unpack routine for the given pointers and geometry.
///
/// The routine keeps its row and line counters in single bytes, so
/// `line_bytes` must be below 256 and `bank_lines` below 128.
pub fn routine(zero_page: &ZeroPage, stepper: &StepperConfig) -> DecodeRoutine {
    let mut assembly = zero_page.equates();
    assembly.push_str(&format!(
        "LINE_BYTES = {}\nBANK_LINES = {}\nGAP_BYTES = {}\n",
        stepper.line_bytes, stepper.bank_lines, stepper.gap_bytes
    ));
    assembly.push_str(BODY);

    DecodeRoutine {
        variant: Variant::Legacy,
        label: LABEL,
        zero_page: *zero_page,
        assembly,
    }
}

/// Whether the routine's 8-bit counters can represent this geometry.
pub fn supports(stepper: &StepperConfig) -> bool {
    (1..256).contains(&stepper.line_bytes) && (1..128).contains(&stepper.bank_lines)
}
