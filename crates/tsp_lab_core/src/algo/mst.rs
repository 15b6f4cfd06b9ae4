use crate::{
    constants::{MIN_CYCLE_POINTS, MST_DENSE_THRESHOLD},
    tour::{tour_cost, Solution},
    Error, Instance, Result,
};

/// MST-based 2-approximation: build a minimum spanning tree, double its
/// edges, and shortcut a depth-first traversal into a Hamiltonian tour.
/// Under the triangle inequality the tour costs at most twice the tree
/// weight.
///
/// Below 500 points both tree constructions are run and the cheaper
/// resulting tour is kept; at or above it, enumerating all O(n^2) edges for
/// the sort-based construction is prohibitive and only the dense one runs.
pub fn solve_mst_approx(instance: &Instance) -> Result<Solution> {
    let n = instance.dimension();
    if n < MIN_CYCLE_POINTS {
        return Err(Error::too_few_points(n));
    }

    if n >= MST_DENSE_THRESHOLD {
        let tree = prim_tree(instance);
        let solution = tour_from_tree(instance, &tree)?;
        log::info!(
            "mst: pick=prim n={n} tree_w={:.2} cost={:.2}",
            tree_weight(instance, &tree),
            solution.cost
        );
        return Ok(solution);
    }

    let prim = prim_tree(instance);
    let kruskal = kruskal_tree(instance);
    let prim_solution = tour_from_tree(instance, &prim)?;
    let kruskal_solution = tour_from_tree(instance, &kruskal)?;

    // Prim wins ties; either tree is minimum, but tie-breaking during
    // construction can yield different Hamiltonian shortcuts.
    let (pick, tree, solution) = if prim_solution.cost <= kruskal_solution.cost {
        ("prim", &prim, prim_solution)
    } else {
        ("kruskal", &kruskal, kruskal_solution)
    };
    log::info!(
        "mst: pick={pick} n={n} tree_w={:.2} cost={:.2}",
        tree_weight(instance, tree),
        solution.cost
    );
    Ok(solution)
}

/// Dense Prim: repeatedly attach the unvisited point with the smallest
/// known connection cost, then relax its neighbors. O(n^2) time, O(n)
/// extra space, no priority queue.
pub(crate) fn prim_tree(instance: &Instance) -> Vec<(usize, usize)> {
    let n = instance.dimension();
    let mut visited = vec![false; n];
    let mut min_cost = vec![f64::INFINITY; n];
    let mut parent = vec![usize::MAX; n];
    min_cost[0] = 0.0;

    let mut edges = Vec::with_capacity(n.saturating_sub(1));
    for _ in 0..n {
        let mut current = usize::MAX;
        for node in 0..n {
            if !visited[node] && (current == usize::MAX || min_cost[node] < min_cost[current]) {
                current = node;
            }
        }

        visited[current] = true;
        if parent[current] != usize::MAX {
            edges.push((parent[current], current));
        }

        for neighbor in 0..n {
            if !visited[neighbor] {
                let d = instance.distance(current, neighbor);
                if d < min_cost[neighbor] {
                    min_cost[neighbor] = d;
                    parent[neighbor] = current;
                }
            }
        }
    }
    edges
}

/// Edge-sort construction: all O(n^2) candidate edges sorted ascending,
/// accepted when their endpoints are in different components. Only viable
/// for small n.
pub(crate) fn kruskal_tree(instance: &Instance) -> Vec<(usize, usize)> {
    let n = instance.dimension();
    let mut candidates = Vec::with_capacity(n * (n - 1) / 2);
    for i in 0..n {
        for j in (i + 1)..n {
            candidates.push((instance.distance(i, j), i, j));
        }
    }
    // Endpoint order as a secondary key keeps equal-weight edges in a
    // reproducible order.
    candidates.sort_unstable_by(|a, b| {
        a.0.total_cmp(&b.0)
            .then_with(|| a.1.cmp(&b.1))
            .then_with(|| a.2.cmp(&b.2))
    });

    let mut components = DisjointSet::new(n);
    let mut edges = Vec::with_capacity(n - 1);
    for (_, i, j) in candidates {
        if components.union(i, j) {
            edges.push((i, j));
            if edges.len() == n - 1 {
                break;
            }
        }
    }
    edges
}

pub(crate) fn tree_weight(instance: &Instance, edges: &[(usize, usize)]) -> f64 {
    edges.iter().map(|&(a, b)| instance.distance(a, b)).sum()
}

/// Double every tree edge into a per-point adjacency arena, walk it with an
/// explicit-stack DFS from point 0 consuming each directed edge once, and
/// keep the first occurrence of every point. Points the traversal never
/// reached (a construction defect, not caller misuse) are appended in
/// ascending index order.
pub(crate) fn tour_from_tree(instance: &Instance, edges: &[(usize, usize)]) -> Result<Solution> {
    let n = instance.dimension();
    let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); n];
    for &(a, b) in edges {
        adjacency[a].push(b);
        adjacency[b].push(a);
    }

    let mut stack = vec![0];
    let mut traversal = Vec::with_capacity(2 * n);
    while let Some(&current) = stack.last() {
        match adjacency[current].pop() {
            Some(next) => stack.push(next),
            None => {
                traversal.push(current);
                stack.pop();
            }
        }
    }
    traversal.reverse();

    let mut tour = Vec::with_capacity(n);
    let mut seen = vec![false; n];
    for point in traversal {
        if !seen[point] {
            seen[point] = true;
            tour.push(point);
        }
    }
    for point in 0..n {
        if !seen[point] {
            log::warn!("mst: point {point} unreached by traversal, appending");
            tour.push(point);
        }
    }

    let cost = tour_cost(instance, &tour)?;
    Ok(Solution::new(tour, cost))
}

/// Union-find with iterative path compression; recursion would risk stack
/// depth on large component chains.
pub(crate) struct DisjointSet {
    parent: Vec<usize>,
}

impl DisjointSet {
    pub(crate) fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
        }
    }

    pub(crate) fn find(&mut self, node: usize) -> usize {
        let mut root = node;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut walk = node;
        while self.parent[walk] != root {
            let next = self.parent[walk];
            self.parent[walk] = root;
            walk = next;
        }
        root
    }

    /// Merges the two components; false when already connected.
    pub(crate) fn union(&mut self, a: usize, b: usize) -> bool {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a == root_b {
            return false;
        }
        self.parent[root_a] = root_b;
        true
    }
}
