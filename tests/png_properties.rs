//! Property tests and cross-decoder validation.
//!
//! The filter round-trip properties drive the defilter engine with
//! arbitrary pixel data and filter choices; the oracle tests check that
//! the `image` crate decodes our synthesized fixtures to the same pixels.

mod support;

use proptest::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};
use rawpix::png::filter::paeth_predictor;
use rawpix::PngDecoder;
use support::pngbuild::{build_png, build_png_unfiltered};

/// Apply a PNG filter to one row, the direction an encoder would.
fn filter_row(filter: u8, raw: &[u8], prev: &[u8], stride: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(raw.len());
    for i in 0..raw.len() {
        let left = if i >= stride { raw[i - stride] } else { 0 };
        let above = prev[i];
        let upper_left = if i >= stride { prev[i - stride] } else { 0 };
        let predictor = match filter {
            0 => 0,
            1 => left,
            2 => above,
            3 => ((left as u16 + above as u16) / 2) as u8,
            4 => paeth_predictor(left, above, upper_left),
            _ => unreachable!(),
        };
        out.push(raw[i].wrapping_sub(predictor));
    }
    out
}

/// Filter `raw` row by row with the given per-row filter types.
fn filter_image(raw: &[u8], scanline: usize, filters: &[u8], stride: usize) -> Vec<u8> {
    let zero = vec![0u8; scanline];
    let mut out = Vec::with_capacity(raw.len() + filters.len());
    let mut prev: &[u8] = &zero;
    for (row, &filter) in raw.chunks(scanline).zip(filters) {
        out.push(filter);
        out.extend_from_slice(&filter_row(filter, row, prev, stride));
        prev = row;
    }
    out
}

fn rgb_image_strategy() -> impl Strategy<Value = (u32, u32, Vec<u8>, Vec<u8>)> {
    (1u32..24, 1u32..8).prop_flat_map(|(w, h)| {
        let pixels = proptest::collection::vec(any::<u8>(), (w * h * 3) as usize);
        let filters = proptest::collection::vec(0u8..=4, h as usize);
        (Just(w), Just(h), pixels, filters)
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_decode_inverts_any_filter_choice((w, h, pixels, filters) in rgb_image_strategy()) {
        let scanline = (w * 3) as usize;
        let filtered = filter_image(&pixels, scanline, &filters, 3);
        let png = build_png(w, h, 8, 2, None, &filtered);

        let decoder = PngDecoder::from_bytes(&png).expect("decode");
        prop_assert_eq!(decoder.raw_data(), pixels.as_slice());
    }

    #[test]
    fn prop_paeth_filter_roundtrips(left in any::<u8>(), above in any::<u8>(), upper_left in any::<u8>(), value in any::<u8>()) {
        // Filtering a byte with Paeth and decoding it against the same
        // neighbors restores the byte.
        let predictor = paeth_predictor(left, above, upper_left);
        let filtered = value.wrapping_sub(predictor);
        prop_assert_eq!(filtered.wrapping_add(paeth_predictor(left, above, upper_left)), value);
    }

    #[test]
    fn prop_paeth_prefers_a_zero_distance_neighbor(left in any::<u8>(), above in any::<u8>()) {
        // With upper_left equal to above, p == left, so left always wins.
        prop_assert_eq!(paeth_predictor(left, above, above), left);
    }

    #[test]
    fn prop_gray_projection_is_stable(pixels in proptest::collection::vec(any::<u8>(), 1..64)) {
        let width = pixels.len() as u32;
        let png = build_png_unfiltered(width, 1, 8, 0, None, &pixels);
        let mut decoder = PngDecoder::from_bytes(&png).expect("decode");

        let first = decoder.rgb_data_to_vec().expect("rgb");
        decoder.reset_cache();
        let second = decoder.rgb_data_to_vec().expect("rgb");
        prop_assert_eq!(first, second);
    }
}

// ============================================================================
// Cross-validation against the `image` crate
// ============================================================================

#[test]
fn test_oracle_rgb8_random_pixels_and_filters() {
    let mut rng = StdRng::seed_from_u64(0x5EED);
    for _ in 0..4 {
        let (w, h) = (rng.gen_range(1..48u32), rng.gen_range(1..24u32));
        let pixels: Vec<u8> = (0..w * h * 3).map(|_| rng.gen()).collect();
        let filters: Vec<u8> = (0..h).map(|_| rng.gen_range(0..=4)).collect();
        let filtered = filter_image(&pixels, (w * 3) as usize, &filters, 3);
        let png = build_png(w, h, 8, 2, None, &filtered);

        let ours = PngDecoder::from_bytes(&png).expect("rawpix decode");
        assert_eq!(ours.raw_data(), pixels.as_slice());

        let theirs = image::load_from_memory(&png).expect("image decode");
        assert_eq!(theirs.to_rgb8().as_raw().as_slice(), pixels.as_slice());
    }
}

#[test]
fn test_oracle_rgba8() {
    let mut rng = StdRng::seed_from_u64(42);
    let (w, h) = (17u32, 9u32);
    let pixels: Vec<u8> = (0..w * h * 4).map(|_| rng.gen()).collect();
    let png = build_png_unfiltered(w, h, 8, 6, None, &pixels);

    let mut ours = PngDecoder::from_bytes(&png).expect("rawpix decode");
    let theirs = image::load_from_memory(&png).expect("image decode");

    assert_eq!(ours.rgba_data().unwrap(), theirs.to_rgba8().as_raw().as_slice());
}

#[test]
fn test_oracle_gray8() {
    let mut rng = StdRng::seed_from_u64(7);
    let (w, h) = (31u32, 5u32);
    let pixels: Vec<u8> = (0..w * h).map(|_| rng.gen()).collect();
    let png = build_png_unfiltered(w, h, 8, 0, None, &pixels);

    let ours = PngDecoder::from_bytes(&png).expect("rawpix decode");
    let theirs = image::load_from_memory(&png).expect("image decode");

    assert_eq!(ours.raw_data(), theirs.to_luma8().as_raw().as_slice());
}

#[test]
fn test_oracle_indexed_expands_identically() {
    let mut rng = StdRng::seed_from_u64(1234);
    let palette: Vec<u8> = (0..48).map(|_| rng.gen()).collect(); // 16 entries
    let (w, h) = (8u32, 8u32);
    let indices: Vec<u8> = (0..w * h).map(|_| rng.gen_range(0..16u8)).collect();
    // Pack two 4-bit indices per byte.
    let mut raw = Vec::with_capacity((w * h) as usize / 2);
    for pair in indices.chunks(2) {
        raw.push((pair[0] << 4) | pair[1]);
    }
    let png = build_png_unfiltered(w, h, 4, 3, Some(&palette), &raw);

    let mut ours = PngDecoder::from_bytes(&png).expect("rawpix decode");
    let theirs = image::load_from_memory(&png).expect("image decode");

    assert_eq!(
        ours.rgb_data().unwrap(),
        theirs.to_rgb8().as_raw().as_slice()
    );
}

#[test]
fn test_oracle_rgb16_preserves_network_order() {
    let mut rng = StdRng::seed_from_u64(99);
    let (w, h) = (6u32, 4u32);
    let raw: Vec<u8> = (0..w * h * 6).map(|_| rng.gen()).collect();
    let png = build_png_unfiltered(w, h, 16, 2, None, &raw);

    let ours = PngDecoder::from_bytes(&png).expect("rawpix decode");
    let theirs = image::load_from_memory(&png).expect("image decode");

    // The raw buffer keeps network byte order; the image crate reads the
    // same stream into native u16 values.
    let our_samples: Vec<u16> = ours
        .raw_data()
        .chunks_exact(2)
        .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
        .collect();
    assert_eq!(our_samples.as_slice(), theirs.to_rgb16().as_raw().as_slice());
}
