//! Magic bitboard tables for sliding pieces.
//!
//! For each square the relevant occupancy (the slider's rays minus the board
//! edge) is multiplied by a fixed magic constant; the top bits of the product
//! index a dense slice of attack sets filled in once at startup.

use once_cell::sync::Lazy;

use crate::board::types::Bitboard;

const ROOK_DIRS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const BISHOP_DIRS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

#[rustfmt::skip]
const BISHOP_MAGICS: [u64; 64] = [
    0x8010_1040_8800_8420, 0x0008_3840_8401_4200, 0x4211_1c04_0840_0000, 0x0008_2050_4310_0c84,
    0x3104_0420_0200_0080, 0x0112_0804_0404_0000, 0x4006_4a28_1440_4810, 0x4600_1080_9010_1008,
    0x0831_9004_5004_0840, 0x0002_1001_0801_0050, 0x0010_1418_128d_1000, 0x9041_5089_1200_0040,
    0x0020_0404_20a6_0000, 0x0000_0082_1040_0428, 0x0008_1202_1082_0800, 0x4001_1020_8410_0800,
    0x0128_0040_1114_00a0, 0x1004_4002_240c_1400, 0x0088_0210_0050_181e, 0x0150_2001_0400_8084,
    0x0001_0002_9040_0000, 0x0306_0001_0802_0240, 0x0001_000c_1401_0400, 0x0000_4002_004a_2840,
    0x81d0_4000_4484_940a, 0x1081_0818_2108_0104, 0x0242_0102_0204_0400, 0x0084_0100_3010_0408,
    0x0819_0010_8300_4020, 0x0820_8202_0908_0200, 0x0001_0204_0420_9420, 0x0002_0020_1200_9644,
    0x2902_2004_0420_0802, 0x0008_2208_4182_4800, 0x0200_1410_0042_0082, 0x0001_400a_0004_2200,
    0x4102_1084_0102_0020, 0x0008_1000_2089_0081, 0x0028_8084_0820_9200, 0x0811_0040_830a_0230,
    0x0041_5010_1000_0406, 0x0406_0804_2400_8200, 0x0043_0040_3000_2204, 0x0060_1020_1804_2100,
    0x2800_8c08_9200_0401, 0x0040_4080_8080_3100, 0x0002_8204_0106_0410, 0x4444_0802_0038_0041,
    0x1044_0088_0490_0040, 0x0862_0280_8858_5820, 0x2020_0821_0808_2400, 0xe008_0225_0848_0208,
    0x0000_2110_4202_0492, 0x0020_2061_0200_8002, 0x0040_a244_0102_0801, 0x1404_4800_8400_8000,
    0x412a_0026_0842_0820, 0x0000_1084_0498_0422, 0x0000_0000_3108_0800, 0x0012_0012_0104_0902,
    0x0000_6020_4008_2202, 0x2002_0140_530c_4101, 0x0142_1020_0104_0092, 0x0330_5010_0304_3061,
];

#[rustfmt::skip]
const ROOK_MAGICS: [u64; 64] = [
    0x8080_0010_8424_4000, 0x00c0_1000_4000_2001, 0x0a00_1022_0008_8042, 0x0900_2005_0010_0008,
    0x8080_0400_8008_0002, 0x6100_0100_0804_0002, 0x0480_0100_1200_0080, 0x0100_0830_8100_0042,
    0x8000_8000_8020_4001, 0x2181_0020_8100_4000, 0x0041_0040_1020_0700, 0x048d_8008_0050_0080,
    0x0815_0005_0010_0800, 0x0223_0008_0401_0002, 0x0004_8002_0080_0100, 0x8001_8000_c080_0100,
    0x9180_8080_0040_0024, 0x2010_0840_0320_0442, 0x0000_8080_2000_1000, 0x1004_0900_1002_2300,
    0x1108_8080_0400_0800, 0x020c_0080_8002_0004, 0x0098_8080_0100_0200, 0x0116_1a00_0c00_8041,
    0x0080_4000_8000_8028, 0x8000_4000_4020_1000, 0x2817_0141_0020_0090, 0x0002_0026_0009_1040,
    0x0000_0800_8004_0080, 0x0808_0400_8002_0080, 0x1000_0200_8080_0100, 0x0200_0102_0010_8844,
    0x0200_4000_8080_0020, 0x0010_0020_1040_0044, 0x8000_8020_0080_1002, 0x4000_8108_0480_1000,
    0x0008_0004_0080_0880, 0x7018_8004_0080_0200, 0x0268_1008_0402_0200, 0x0042_8006_c080_2700,
    0x0000_9120_c001_8000, 0x5800_5000_2004_4000, 0x1400_8200_4012_0020, 0x2010_0800_1000_8080,
    0x4002_0010_040a_0020, 0x0102_0009_0402_0010, 0x8000_0200_0100_8080, 0x0000_a080_5102_0014,
    0xc810_4021_0080_0100, 0x8008_2000_4000_8480, 0x20f8_8010_0020_0080, 0x0010_0028_0032_8280,
    0x0008_0008_8004_0080, 0x0111_8084_0082_0080, 0x2004_4102_1008_0400, 0x2010_0104_0040_a200,
    0x2480_1442_2100_8001, 0x80c3_2018_4000_8101, 0x4040_2008_4200_1082, 0x4002_0008_0440_1022,
    0x0848_0010_0500_194d, 0x0001_0006_0814_0029, 0x0001_0004_0082_0041, 0x6880_0081_1024_0042,
];

#[derive(Clone, Copy, Debug, Default)]
struct MagicEntry {
    mask: u64,
    magic: u64,
    shift: u32,
    offset: usize,
}

pub(crate) struct MagicTable {
    entries: [MagicEntry; 64],
    attacks: Vec<Bitboard>,
}

impl MagicTable {
    #[inline]
    pub(crate) fn attack(&self, square: usize, occupancy: Bitboard) -> Bitboard {
        let entry = &self.entries[square];
        let index = ((occupancy.0 & entry.mask).wrapping_mul(entry.magic) >> entry.shift) as usize;
        self.attacks[entry.offset + index]
    }
}

pub(crate) static BISHOP_TABLE: Lazy<MagicTable> =
    Lazy::new(|| build_table(&BISHOP_DIRS, &BISHOP_MAGICS));
pub(crate) static ROOK_TABLE: Lazy<MagicTable> = Lazy::new(|| build_table(&ROOK_DIRS, &ROOK_MAGICS));

/// Trace each ray from `square` until it leaves the board or hits a blocker
/// (the blocker itself is included).
pub(crate) fn slider_attacks_slow(square: usize, occupancy: u64, dirs: &[(i8, i8)]) -> u64 {
    let rank = (square / 8) as i8;
    let file = (square % 8) as i8;
    let mut attacks = 0u64;
    for &(dr, df) in dirs {
        let (mut r, mut f) = (rank + dr, file + df);
        while (0..8).contains(&r) && (0..8).contains(&f) {
            let bit = 1u64 << (r * 8 + f);
            attacks |= bit;
            if occupancy & bit != 0 {
                break;
            }
            r += dr;
            f += df;
        }
    }
    attacks
}

pub(crate) fn rook_attacks_slow(square: usize, occupancy: u64) -> u64 {
    slider_attacks_slow(square, occupancy, &ROOK_DIRS)
}

pub(crate) fn bishop_attacks_slow(square: usize, occupancy: u64) -> u64 {
    slider_attacks_slow(square, occupancy, &BISHOP_DIRS)
}

/// Ray squares whose occupancy affects the attack set (edges excluded).
fn relevant_mask(square: usize, dirs: &[(i8, i8)]) -> u64 {
    let rank = (square / 8) as i8;
    let file = (square % 8) as i8;
    let mut mask = 0u64;
    for &(dr, df) in dirs {
        let (mut r, mut f) = (rank + dr, file + df);
        while (0..8).contains(&(r + dr)) && (0..8).contains(&(f + df)) {
            mask |= 1u64 << (r * 8 + f);
            r += dr;
            f += df;
        }
    }
    mask
}

/// Spread the low `mask.count_ones()` bits of `index` over the set bits of `mask`.
fn set_occupancy(index: usize, mut mask: u64) -> u64 {
    let bits = mask.count_ones();
    let mut occupancy = 0u64;
    for i in 0..bits {
        let sq = mask.trailing_zeros();
        mask &= mask - 1;
        if index & (1 << i) != 0 {
            occupancy |= 1u64 << sq;
        }
    }
    occupancy
}

fn build_table(dirs: &[(i8, i8)], magics: &[u64; 64]) -> MagicTable {
    let mut entries = [MagicEntry::default(); 64];
    let mut attacks: Vec<Bitboard> = Vec::new();

    for (square, entry) in entries.iter_mut().enumerate() {
        let mask = relevant_mask(square, dirs);
        let bits = mask.count_ones();
        let size = 1usize << bits;
        *entry = MagicEntry {
            mask,
            magic: magics[square],
            shift: 64 - bits,
            offset: attacks.len(),
        };
        attacks.resize(attacks.len() + size, Bitboard::EMPTY);
        for i in 0..size {
            let occ = set_occupancy(i, mask);
            let idx = (occ.wrapping_mul(entry.magic) >> entry.shift) as usize;
            attacks[entry.offset + idx] = Bitboard(slider_attacks_slow(square, occ, dirs));
        }
    }

    MagicTable { entries, attacks }
}
