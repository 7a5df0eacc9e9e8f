use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ddm_struct::distance::{difference, pairwise_distances};
use ddm_struct::reader::StructureReader;

/// Generate a synthetic PDB string with `n_residues` residues in chain B.
/// Each residue has 4 backbone atoms (N, CA, C, O) placed in a rough alpha-helix
/// geometry; `stretch` scales the helix rise to mimic a second conformation.
fn synthetic_pdb(n_residues: usize, stretch: f64) -> String {
    let mut lines = Vec::new();
    lines.push("HEADER                                                        BENCH".to_string());

    let mut serial = 1;
    let residues = ["ALA", "GLY", "VAL", "LEU", "ILE"];
    for i in 0..n_residues {
        let resname = residues[i % residues.len()];
        let resseq = i + 1;
        let angle = (i as f64) * 100.0_f64.to_radians();
        let rise = i as f64 * 1.5 * stretch;
        let radius = 2.3;

        let atoms = [
            ("N ", 0.0_f64, 0.0_f64, 0.0_f64),
            ("CA", 1.458, 0.0, 0.0),
            ("C ", 2.009, 1.420, 0.0),
            ("O ", 1.246, 2.390, 0.0),
        ];

        for (name, dx, dy, dz) in &atoms {
            let x = radius * angle.cos() + dx;
            let y = radius * angle.sin() + dy;
            let z = rise + dz;
            lines.push(format!(
                "ATOM  {:>5}  {:<3} {} B{:>4}    {:>8.3}{:>8.3}{:>8.3}  1.00  0.00           {}",
                serial,
                name,
                resname,
                resseq,
                x,
                y,
                z,
                &name[..1]
            ));
            serial += 1;
        }
    }
    lines.push("TER".to_string());
    lines.push("END".to_string());
    lines.join("\n")
}

fn bench_read(c: &mut Criterion) {
    let mut group = c.benchmark_group("read_structure");

    // ~10k atoms = 2500 residues × 4 atoms
    let pdb_10k = synthetic_pdb(2500, 1.0);
    let reader = StructureReader::new('B');

    group.bench_function("10k_atoms", |b| {
        b.iter(|| reader.parse_str(black_box(&pdb_10k)))
    });

    group.finish();
}

fn bench_distances(c: &mut Criterion) {
    let mut group = c.benchmark_group("pairwise_distances");

    let reader = StructureReader::new('B');
    let structure = reader.parse_str(&synthetic_pdb(500, 1.0)).unwrap();

    group.bench_function("500_residues", |b| {
        b.iter(|| pairwise_distances(black_box(&structure.coords)))
    });

    group.finish();
}

fn bench_difference(c: &mut Criterion) {
    let mut group = c.benchmark_group("difference");

    let reader = StructureReader::new('B');
    let a = reader.parse_str(&synthetic_pdb(500, 1.0)).unwrap();
    let b = reader.parse_str(&synthetic_pdb(500, 1.1)).unwrap();
    let da = pairwise_distances(&a.coords);
    let db = pairwise_distances(&b.coords);

    group.bench_function("500_residues", |bench| {
        bench.iter(|| difference(black_box(&da), black_box(&db)))
    });

    group.finish();
}

criterion_group!(benches, bench_read, bench_distances, bench_difference);
criterion_main!(benches);
