#![no_main]
mod fuzz_shared;
use bowyer_watson::{DelaunayMesh, InsertionError};
use fuzz_shared::{FuzzPoint, FRAME_SIZE};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: Vec<FuzzPoint>| {
    let mut mesh = DelaunayMesh::new(FRAME_SIZE, FRAME_SIZE);
    for point in &data {
        let before = mesh.triangle_indices();
        match mesh.insert(point.position()) {
            Ok(_) => {}
            Err(InsertionError::BrokenBoundary) => panic!("Broken boundary for {:?}", point),
            Err(_) => assert_eq!(mesh.triangle_indices(), before),
        }
    }
    mesh.sanity_check();
});
