//! 6502 LZ4 block decoder.
//!
//! Before `jsr unlz4` the caller loads `ATR_SRC` with the block address,
//! `ATR_LEN` with the address one past its last byte and `ATR_DST` with
//! the destination. Output is written linearly; the bank gap is already
//! part of the data. `ATR_TMP` holds the match source pointer.

use atrpack_core::{DecodeRoutine, Variant, ZeroPage};

/// Procedure label of the routine.
pub const LABEL: &str = "unlz4";

const BODY: &str = r#"
		.proc unlz4
		ldy #0
token	jsr getsrc
		sta tok
		lsr @
		lsr @
		lsr @
		lsr @
		jsr getlen		; literal count
		jsr cntzero
		beq nolits
lits	jsr getsrc
		sta (ATR_DST_L),y
		jsr incdst
		jsr deccnt
		bne lits

nolits	lda ATR_SRC_L		; block ends after the last literals
		cmp ATR_LEN_L
		lda ATR_SRC_H
		sbc ATR_LEN_H
		bcc match
		rts

match	jsr getsrc
		sta ofs
		jsr getsrc
		sta ofs+1
		sec
		lda ATR_DST_L
		sbc ofs
		sta ATR_TMP_L
		lda ATR_DST_H
		sbc ofs+1
		sta ATR_TMP_H
		lda tok
		and #$0F
		jsr getlen
		clc
		lda cnt
		adc #4
		sta cnt
		bcc copy
		inc cnt+1
copy	lda (ATR_TMP_L),y
		sta (ATR_DST_L),y
		inc ATR_TMP_L
		bne copy1
		inc ATR_TMP_H
copy1	jsr incdst
		jsr deccnt
		bne copy
		jmp token

getlen	sta cnt
		sty cnt+1
		cmp #15
		bne getlen2
getlen1	jsr getsrc
		pha
		clc
		adc cnt
		sta cnt
		bcc getlen3
		inc cnt+1
getlen3	pla
		cmp #255
		beq getlen1
getlen2	rts

cntzero	lda cnt
		ora cnt+1
		rts

deccnt	lda cnt
		bne deccnt1
		dec cnt+1
deccnt1	dec cnt
		jmp cntzero

getsrc	lda (ATR_SRC_L),y
		inc ATR_SRC_L
		bne getsrc1
		inc ATR_SRC_H
getsrc1	rts

incdst	inc ATR_DST_L
		bne incdst1
		inc ATR_DST_H
incdst1	rts

tok		.byte 0
ofs		.word 0
cnt		.word 0
		.endp
"#;

/// Build the LZ4 routine for the given pointers.
pub fn routine(zero_page: &ZeroPage) -> DecodeRoutine {
    let mut assembly = zero_page.equates();
    assembly.push_str(BODY);

    DecodeRoutine {
        variant: Variant::Alternate,
        label: LABEL,
        zero_page: *zero_page,
        assembly,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routine_uses_zero_page() {
        let zp = ZeroPage {
            src: 0x80,
            len: 0x82,
            dst: 0x84,
            tmp: 0x86,
        };
        let r = routine(&zp);
        assert_eq!(r.variant, Variant::Alternate);
        assert_eq!(r.label, "unlz4");
        assert!(r.assembly.contains("ATR_SRC_L = $80"));
        assert!(r.assembly.contains("ATR_TMP_H = $87"));
        assert!(r.assembly.trim_end().ends_with(".endp"));
    }
}
