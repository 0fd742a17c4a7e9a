#![no_main]
use libfuzzer_sys::fuzz_target;
use rapid_qoi::{Colors, Qoi};
use zenrecode::*;

fuzz_target!(|input: (u8, u8, i16, &[u8])| {
    // Any valid image at any target must transcode to the size the scale
    // arithmetic predicts.
    let (w, h, target, seed) = input;
    let (w, h) = (u32::from(w).max(1), u32::from(h).max(1));
    let pixels: Vec<u8> = (0..(w * h * 4) as usize)
        .map(|i| seed.get(i % seed.len().max(1)).copied().unwrap_or(0))
        .collect();
    let Ok(image) = (Qoi { width: w, height: h, colors: Colors::SrgbLinA }).encode_alloc(&pixels)
    else {
        return;
    };

    let mut out = Vec::new();
    let status = transcode_operation(&mut &image[..], &mut out, QoiCodec, i32::from(target));
    assert_eq!(status, 0);

    let factor = scale_factor(h, i32::from(target));
    let expected = scaled_dimensions(w, h, factor);
    let header = Qoi::decode_header(&out).expect("output must be QOI");
    assert_eq!((header.width, header.height), expected);
});
