#![no_main]
use libfuzzer_sys::fuzz_target;
use zenrecode::*;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes must never panic, and anything the codec rejects
    // must come back byte-for-byte.
    let mut out = Vec::new();
    let report = TranscodeRequest::new(QoiCodec, 64)
        .with_limits(Limits {
            max_pixels: Some(1 << 22),
            ..Default::default()
        })
        .run(&mut &data[..], &mut out)
        .expect("in-memory transcode cannot fail");

    match report {
        Report::PassedThrough { bytes, .. } => {
            assert_eq!(bytes, data.len());
            assert_eq!(out, data, "passthrough altered the input");
        }
        Report::Transcoded { info, output_bytes, .. } => {
            assert_eq!(output_bytes, out.len());
            assert!(info.width >= 1 && info.height >= 1);
            assert!(info.width <= info.source.width);
            assert!(info.height <= info.source.height);
        }
    }
});
