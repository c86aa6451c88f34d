use crate::application::ports::GenerationParams;

#[derive(Debug, Clone, PartialEq)]
pub struct BeamSearchConfig {
    pub num_beams: usize,
    pub min_length: usize,
    pub max_length: usize,
    pub length_penalty: f32,
    pub no_repeat_ngram_size: usize,
    pub eos_token_id: u32,
    pub decoder_start_token_id: u32,
}

impl BeamSearchConfig {
    pub fn from_params(
        params: &GenerationParams,
        eos_token_id: u32,
        decoder_start_token_id: u32,
    ) -> Self {
        Self {
            num_beams: params.num_beams.max(1),
            min_length: params.min_length,
            max_length: params.max_length.max(1),
            length_penalty: params.length_penalty,
            no_repeat_ngram_size: params.no_repeat_ngram_size,
            eos_token_id,
            decoder_start_token_id,
        }
    }
}

#[derive(Debug, Clone)]
struct Beam {
    tokens: Vec<u32>,
    log_prob: f32,
}

impl Beam {
    fn generated_len(&self) -> usize {
        self.tokens.len() - 1
    }
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    beam: usize,
    token: u32,
    log_prob: f32,
}

struct Hypotheses {
    capacity: usize,
    length_penalty: f32,
    finished: Vec<(Vec<u32>, f32)>,
}

impl Hypotheses {
    fn new(capacity: usize, length_penalty: f32) -> Self {
        Self {
            capacity,
            length_penalty,
            finished: Vec::with_capacity(capacity + 1),
        }
    }

    /// `generated` excludes the decoder start token; the terminating EOS counts
    /// toward the normalized length.
    fn add(&mut self, generated: Vec<u32>, log_prob: f32) {
        let length = (generated.len() + 1) as f32;
        let score = log_prob / length.powf(self.length_penalty);
        self.finished.push((generated, score));
        self.finished.sort_by(|a, b| b.1.total_cmp(&a.1));
        self.finished.truncate(self.capacity);
    }

    fn is_full(&self) -> bool {
        self.finished.len() >= self.capacity
    }

    fn best(self) -> Option<Vec<u32>> {
        self.finished.into_iter().next().map(|(tokens, _)| tokens)
    }
}

/// Deterministic beam search over a step scorer.
///
/// `score_step` receives every live beam's token sequence (all the same length,
/// starting with the decoder start token) and must return one row of
/// log-probabilities over the vocabulary per beam. Returns the best finished
/// hypothesis without the start and end tokens.
pub fn beam_search<F, E>(config: &BeamSearchConfig, mut score_step: F) -> Result<Vec<u32>, E>
where
    F: FnMut(&[Vec<u32>]) -> Result<Vec<Vec<f32>>, E>,
{
    let mut beams = vec![Beam {
        tokens: vec![config.decoder_start_token_id],
        log_prob: 0.0,
    }];
    let mut hypotheses = Hypotheses::new(config.num_beams, config.length_penalty);

    while !beams.is_empty() && beams[0].generated_len() < config.max_length {
        let sequences: Vec<Vec<u32>> = beams.iter().map(|b| b.tokens.clone()).collect();
        let log_probs = score_step(&sequences)?;

        let mut candidates: Vec<Candidate> = Vec::new();
        for (index, (beam, row)) in beams.iter().zip(&log_probs).enumerate() {
            candidates.extend(top_candidates(config, index, beam, row));
        }
        candidates.sort_by(|a, b| b.log_prob.total_cmp(&a.log_prob));

        let mut next_beams = Vec::with_capacity(config.num_beams);
        for (rank, candidate) in candidates.iter().enumerate() {
            let parent = &beams[candidate.beam];
            if candidate.token == config.eos_token_id {
                if rank < config.num_beams {
                    hypotheses.add(parent.tokens[1..].to_vec(), candidate.log_prob);
                }
                continue;
            }

            let mut tokens = parent.tokens.clone();
            tokens.push(candidate.token);
            next_beams.push(Beam {
                tokens,
                log_prob: candidate.log_prob,
            });
            if next_beams.len() == config.num_beams {
                break;
            }
        }

        beams = next_beams;
        if hypotheses.is_full() {
            break;
        }
    }

    if !hypotheses.is_full() {
        for beam in beams {
            hypotheses.add(beam.tokens[1..].to_vec(), beam.log_prob);
        }
    }

    Ok(hypotheses.best().unwrap_or_default())
}

fn top_candidates(
    config: &BeamSearchConfig,
    beam_index: usize,
    beam: &Beam,
    row: &[f32],
) -> Vec<Candidate> {
    let keep = 2 * config.num_beams;
    let banned = banned_tokens(&beam.tokens, config.no_repeat_ngram_size);
    let eos_allowed = beam.generated_len() >= config.min_length;

    let mut best: Vec<Candidate> = Vec::with_capacity(keep + 1);
    for (token, &log_prob) in row.iter().enumerate() {
        let token = token as u32;
        if !log_prob.is_finite()
            || (token == config.eos_token_id && !eos_allowed)
            || banned.contains(&token)
        {
            continue;
        }

        let total = beam.log_prob + log_prob;
        if best.len() == keep && best.last().is_some_and(|worst| worst.log_prob >= total) {
            continue;
        }

        let at = best.partition_point(|c| c.log_prob >= total);
        best.insert(
            at,
            Candidate {
                beam: beam_index,
                token,
                log_prob: total,
            },
        );
        best.truncate(keep);
    }
    best
}

/// Tokens that would complete an n-gram already present in `tokens`.
pub fn banned_tokens(tokens: &[u32], ngram_size: usize) -> Vec<u32> {
    if ngram_size == 0 || tokens.len() + 1 < ngram_size {
        return Vec::new();
    }

    let prefix = &tokens[tokens.len() + 1 - ngram_size..];
    tokens
        .windows(ngram_size)
        .filter(|window| &window[..ngram_size - 1] == prefix)
        .map(|window| window[ngram_size - 1])
        .collect()
}
