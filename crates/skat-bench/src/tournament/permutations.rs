use crate::config::SEATS;

/// All six orderings of three agents, in lexicographic order. Round `n`
/// seats agents by permutation `n % 6`.
pub struct SeatPermutations {
    permutations: Vec<[usize; SEATS]>,
}

impl SeatPermutations {
    pub fn new() -> Self {
        let mut permutations = Vec::with_capacity(6);
        let mut base = [0usize, 1, 2];
        generate(&mut base, 0, &mut permutations);
        permutations.sort();
        Self { permutations }
    }

    pub fn as_slice(&self) -> &[[usize; SEATS]] {
        &self.permutations
    }

    /// Seating for `round`, as (permutation index, agent index per seat).
    pub fn for_round(&self, round: usize) -> (usize, [usize; SEATS]) {
        let index = round % self.permutations.len();
        (index, self.permutations[index])
    }
}

impl Default for SeatPermutations {
    fn default() -> Self {
        Self::new()
    }
}

fn generate(data: &mut [usize; SEATS], start: usize, output: &mut Vec<[usize; SEATS]>) {
    if start == data.len() - 1 {
        output.push(*data);
        return;
    }

    for idx in start..data.len() {
        data.swap(start, idx);
        generate(data, start + 1, output);
        data.swap(start, idx);
    }
}
