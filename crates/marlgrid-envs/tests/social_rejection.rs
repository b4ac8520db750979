use marlgrid::comm::MESSAGES_KEY;
use marlgrid::config::{CommConfig, GridEnvConfig};
use marlgrid::env::{Action, EpisodeStats, MultiAgentEnv, Observation};
use marlgrid::grid::{Carrying, GridAction, WorldObj};
use marlgrid_envs::{SocialRejection, SocialRejectionConfig};
use rand::SeedableRng;

fn config(width: usize, height: usize, max_steps: u32) -> SocialRejectionConfig {
    SocialRejectionConfig {
        grid: GridEnvConfig {
            width,
            height,
            max_steps,
            n_agents: 3,
            ..Default::default()
        },
        ..Default::default()
    }
}

fn idle(n: usize) -> Vec<Action> {
    vec![Action::Discrete(GridAction::Done as usize); n]
}

#[test]
fn test_divider_has_two_row_gap() {
    for (width, height) in [(10, 10), (15, 9), (25, 12)] {
        let mut env = SocialRejection::make(config(width, height, 10)).unwrap();
        for seed in 0..5 {
            env.reset(Some(seed)).unwrap();
            let grid = env.world().grid();
            let wall_x = width / 5;
            for y in 0..height {
                let open = y == height / 2 || y == height / 2 + 1;
                let expected = if open { None } else { Some(WorldObj::Wall) };
                assert_eq!(grid.get(wall_x, y), expected, "{width}x{height} row {y}");
            }
        }
    }
}

#[test]
fn test_items_and_agents_start_in_forage_zone() {
    let cfg = SocialRejectionConfig {
        n_clutter: Some(5),
        clutter_density: None,
        n_good_berries: 4,
        n_bad_berries: 2,
        ..config(15, 10, 10)
    };
    let mut env = SocialRejection::make(cfg).unwrap();

    for seed in 0..10 {
        env.reset(Some(seed)).unwrap();
        let world = env.world();
        let wall_x = env.scenario().wall_x_pos();

        for obj in [WorldObj::Berry, WorldObj::PoisonedBerry] {
            assert!(world.grid().positions_of(obj).iter().all(|p| p.0 > wall_x));
        }
        assert_eq!(world.grid().count(WorldObj::Berry), 4);
        assert_eq!(world.grid().count(WorldObj::PoisonedBerry), 2);

        // border + divider + clutter
        let border = 2 * 15 + 2 * 8;
        let divider = 10 - 2 - 2;
        assert_eq!(world.grid().count(WorldObj::Wall), border + divider + 5);

        let agents = world.agents();
        assert!(agents.iter().all(|a| a.pos.0 > wall_x));
        assert!(agents.iter().all(|a| a.carrying == Carrying::Nothing));
        for (i, a) in agents.iter().enumerate() {
            assert!(agents[i + 1..].iter().all(|b| b.pos != a.pos));
            assert_eq!(world.grid().get(a.pos.0, a.pos.1), None);
        }
    }
}

#[test]
fn test_no_signal_before_horizon() {
    let mut env = SocialRejection::make(config(10, 10, 6)).unwrap();
    env.reset(Some(3)).unwrap();

    for _ in 0..5 {
        let step = env.step(&idle(3)).unwrap();
        assert!(step.rewards.is_none());
        assert!(!step.done);
    }
    let step = env.step(&idle(3)).unwrap();
    assert!(step.done);
    // Nobody moved, so nobody made it home
    assert_eq!(step.rewards, Some(vec![-1.0; 3]));
}

#[test]
fn test_survivors_split_pool_at_horizon() {
    let cfg = SocialRejectionConfig {
        good_berry_reward: 0.1,
        poisoned_berry_reward: -0.8,
        ..config(10, 10, 2)
    };
    let mut env = SocialRejection::make(cfg).unwrap();
    env.reset(Some(9)).unwrap();

    {
        let agents = env.world_mut().agents_mut();
        agents[0].pos = (1, 3);
        agents[0].carrying = Carrying::Berry;
        agents[1].pos = (1, 6);
        agents[1].carrying = Carrying::Nothing;
        agents[2].pos = (6, 6);
        agents[2].carrying = Carrying::Berry;
    }

    assert!(env.step(&idle(3)).unwrap().rewards.is_none());
    let rewards = env.step(&idle(3)).unwrap().rewards.unwrap();
    assert!((rewards[0] - 0.05).abs() < 1e-6);
    assert_eq!(rewards[0], rewards[1]);
    assert_eq!(rewards[2], -1.0);
}

#[test]
fn test_reward_decay_leaves_group_share_intact() {
    let mut cfg = config(10, 10, 1);
    cfg.grid.n_agents = 2;
    cfg.grid.reward_decay = true;
    let mut env = SocialRejection::make(cfg).unwrap();
    env.reset(Some(4)).unwrap();

    {
        let agents = env.world_mut().agents_mut();
        agents[0].pos = (1, 2);
        agents[0].carrying = Carrying::Berry;
        agents[1].pos = (1, 7);
        agents[1].carrying = Carrying::Nothing;
    }

    let step = env.step(&idle(2)).unwrap();
    assert!(step.done);
    let rewards = step.rewards.unwrap();
    assert!(rewards.iter().all(|r| (r - 0.05).abs() < 1e-6), "{rewards:?}");
}

#[test]
fn test_survivors_reported_from_positions() {
    let cfg = SocialRejectionConfig {
        poisoned_berry_reward: -4.0,
        ..config(10, 10, 1)
    };
    let mut env = SocialRejection::make(cfg).unwrap();
    env.reset(Some(2)).unwrap();

    {
        let agents = env.world_mut().agents_mut();
        agents[0].pos = (1, 2);
        agents[0].carrying = Carrying::PoisonedBerry;
        agents[1].pos = (1, 3);
        agents[1].carrying = Carrying::Nothing;
        agents[2].pos = (7, 7);
    }

    let step = env.step(&idle(3)).unwrap();
    // both refugees share the poison: -2 each
    assert_eq!(step.rewards, Some(vec![-2.0, -2.0, -1.0]));
    assert_eq!(step.info.get("survivors"), Some(2.0));
}

#[test]
fn test_episode_stats_over_random_play() {
    let env = SocialRejection::make(config(10, 10, 20)).unwrap();
    let mut env = EpisodeStats::new(env);
    let mut rng = rand::rngs::StdRng::seed_from_u64(0);

    env.reset(Some(0)).unwrap();
    let space = env.action_space();
    let mut last = None;
    for _ in 0..20 {
        let actions: Vec<Action> = (0..3).map(|_| space.sample(&mut rng)).collect();
        last = Some(env.step(&actions).unwrap());
    }

    let last = last.unwrap();
    assert!(last.done);
    assert_eq!(last.info.get("episode_length"), Some(20.0));
    let rewards = last.rewards.unwrap();
    let mean = rewards.iter().sum::<f32>() / 3.0;
    assert_eq!(last.info.get("episode_return"), Some(mean));
}

#[test]
fn test_comm_wrapper_over_social_rejection() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("messages.txt");
    let cfg = SocialRejectionConfig {
        comm: Some(CommConfig {
            max_msg_len: 3,
            vocab_size: 5,
            n_agents: Some(3),
            text_save_file: Some(path.clone()),
        }),
        ..config(10, 10, 4)
    };
    let mut env = SocialRejection::make_with_comm(cfg).unwrap();

    let obs = env.reset(Some(1)).unwrap();
    assert_eq!(obs.len(), 3);
    for o in &obs {
        assert_eq!(o.get(MESSAGES_KEY), Some(&Observation::Text(String::new())));
        assert!(o.get("pov").is_some());
    }

    let actions: Vec<Action> = ["abcde", "b", ""]
        .iter()
        .map(|m| {
            Action::dict(vec![
                ("actions", Action::Discrete(GridAction::Left as usize)),
                ("messages", Action::Text(m.to_string())),
            ])
        })
        .collect();
    let step = env.step(&actions).unwrap();

    let space = env.observation_space();
    let expected = env.channel().current().to_observation();
    assert_eq!(expected, Observation::Text("abcb".to_string()));
    for o in &step.observations {
        assert_eq!(o.get(MESSAGES_KEY), Some(&expected));
        assert!(space.contains_observation(o));
    }
    assert_eq!(env.channel().history().len(), 1);

    env.close().unwrap();
    let contents = std::fs::read_to_string(&path).unwrap();
    assert_eq!(contents, "abc\nb\n\n");
}
