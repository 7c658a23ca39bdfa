#![no_main]

use libfuzzer_sys::fuzz_target;
use mscompress::lzss::{Session, F, N, START_POS};

// Slides the window over fuzz-chosen bytes the way the compressor does,
// checking the match index after every full window turn. The first input
// byte narrows the alphabet so long equal runs are common.
fuzz_target!(|data: &[u8]| {
    let Some((&alphabet, bytes)) = data.split_first() else { return };
    let alphabet = (alphabet % 8).max(1);

    let mut session = Session::new().expect("session allocation");
    let mut cursor = START_POS;
    for k in 0..F {
        session.prime(START_POS + k, 0);
    }

    for (step, &byte) in bytes.iter().enumerate() {
        session.slide(cursor, Some(byte % alphabet));
        let found = session.insert(cursor, F);
        assert!(found.length <= F);
        if found.is_usable() {
            assert!(found.position < N && found.position != cursor);
        }

        if step % N == N - 1 {
            session.index().check_consistency(session.window(), F).expect("index consistent");
        }
        cursor = (cursor + 1) & (N - 1);
    }

    session.index().check_consistency(session.window(), F).expect("index consistent");
});
