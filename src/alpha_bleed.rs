//! Recolours fully transparent pixels with the average colour of their
//! nearest opaque neighbours, growing outward one ring at a time. Alpha stays
//! at zero, so the image looks identical, but bicubic resampling no longer
//! blends black into the edges of the shape.

use bit_vec::BitVec;
use image::{Rgba, RgbaImage};

const NEIGHBOURS: &[(i64, i64)] = &[
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

pub fn alpha_bleed(img: &mut RgbaImage) {
    let (w, h) = img.dimensions();
    let len = (w as usize) * (h as usize);
    let index = |x: u32, y: u32| (y as usize) * (w as usize) + x as usize;

    let neighbours = move |x: u32, y: u32| {
        NEIGHBOURS.iter().filter_map(move |&(dx, dy)| {
            let nx = x as i64 + dx;
            let ny = y as i64 + dy;
            (nx >= 0 && ny >= 0 && nx < w as i64 && ny < h as i64).then(|| (nx as u32, ny as u32))
        })
    };

    // Pixels whose colour may be sampled, and pixels already queued.
    let mut coloured = BitVec::from_elem(len, false);
    let mut queued = BitVec::from_elem(len, false);
    let mut frontier = Vec::new();

    for (x, y, pixel) in img.enumerate_pixels() {
        if pixel[3] != 0 {
            coloured.set(index(x, y), true);
            queued.set(index(x, y), true);
        }
    }

    for y in 0..h {
        for x in 0..w {
            if queued[index(x, y)] {
                continue;
            }
            if neighbours(x, y).any(|(nx, ny)| coloured[index(nx, ny)]) {
                queued.set(index(x, y), true);
                frontier.push((x, y));
            }
        }
    }

    while !frontier.is_empty() {
        let mut next = Vec::new();

        for &(x, y) in &frontier {
            let mut sum = [0u32; 3];
            let mut count = 0u32;

            for (nx, ny) in neighbours(x, y) {
                let i = index(nx, ny);
                if coloured[i] {
                    let source = img.get_pixel(nx, ny);
                    sum[0] += u32::from(source[0]);
                    sum[1] += u32::from(source[1]);
                    sum[2] += u32::from(source[2]);
                    count += 1;
                } else if !queued[i] {
                    queued.set(i, true);
                    next.push((nx, ny));
                }
            }

            let count = count.max(1);
            img.put_pixel(
                x,
                y,
                Rgba([
                    (sum[0] / count) as u8,
                    (sum[1] / count) as u8,
                    (sum[2] / count) as u8,
                    0,
                ]),
            );
        }

        // A ring only becomes sampleable once it is fully coloured.
        for &(x, y) in &frontier {
            coloured.set(index(x, y), true);
        }
        frontier = next;
    }
}
