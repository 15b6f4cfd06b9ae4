use crate::{constants::LARGE_INSTANCE_THRESHOLD, node::Point};

/// A TSP instance: ordered point set plus the distance oracle over it.
///
/// Small instances carry a precomputed symmetric distance matrix (flat,
/// row-major, zero diagonal). At or above 50 000 points the matrix would
/// cost O(n^2) memory, so it is skipped and every lookup recomputes the
/// Euclidean distance from coordinates.
#[derive(Clone, Debug)]
pub struct Instance {
    name: String,
    points: Vec<Point>,
    matrix: Option<Vec<f64>>,
}

impl Instance {
    pub fn new(name: impl Into<String>, points: Vec<Point>) -> Self {
        let name = name.into();
        let n = points.len();
        let matrix = if n >= LARGE_INSTANCE_THRESHOLD {
            log::info!("instance: name={name} n={n} mode=on-demand (matrix skipped)");
            None
        } else {
            Some(Self::build_matrix(&points))
        };
        Self {
            name,
            points,
            matrix,
        }
    }

    fn build_matrix(points: &[Point]) -> Vec<f64> {
        let n = points.len();
        let mut matrix = vec![0.0; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                let d = points[i].dist(&points[j]);
                matrix[i * n + j] = d;
                matrix[j * n + i] = d;
            }
        }
        matrix
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dimension(&self) -> usize {
        self.points.len()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// True when distances are recomputed on demand instead of read from
    /// the precomputed matrix.
    pub fn is_large(&self) -> bool {
        self.matrix.is_none()
    }

    /// Cost of traveling between points `i` and `j`. Symmetric, zero on
    /// the diagonal, no side effects.
    #[inline]
    pub fn distance(&self, i: usize, j: usize) -> f64 {
        match &self.matrix {
            Some(matrix) => matrix[i * self.points.len() + j],
            None => self.points[i].dist(&self.points[j]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Instance;
    use crate::node::Point;

    fn square() -> Instance {
        Instance::new(
            "square",
            vec![
                Point::new(0.0, 0.0),
                Point::new(0.0, 1.0),
                Point::new(1.0, 1.0),
                Point::new(1.0, 0.0),
            ],
        )
    }

    #[test]
    fn matrix_is_symmetric_with_zero_diagonal() {
        let instance = square();
        let n = instance.dimension();
        for i in 0..n {
            assert_eq!(instance.distance(i, i), 0.0);
            for j in 0..n {
                assert_eq!(instance.distance(i, j), instance.distance(j, i));
            }
        }
    }

    #[test]
    fn matrix_distances_match_coordinates() {
        let instance = square();
        let points = instance.points().to_vec();
        for i in 0..points.len() {
            for j in 0..points.len() {
                let direct = points[i].dist(&points[j]);
                assert!((instance.distance(i, j) - direct).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn large_instances_skip_the_matrix() {
        let points: Vec<Point> = (0..50_000).map(|i| Point::new(i as f64, 0.0)).collect();
        let instance = Instance::new("big", points);
        assert!(instance.is_large());
        assert!((instance.distance(0, 49_999) - 49_999.0).abs() < 1e-9);
        assert!((instance.distance(49_999, 0) - 49_999.0).abs() < 1e-9);
    }

    #[test]
    fn small_instances_keep_the_matrix() {
        assert!(!square().is_large());
    }
}
