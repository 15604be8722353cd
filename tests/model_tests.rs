//! Wire model tests: dimensions, samples and the position payload

#[cfg(test)]
mod tests {
    use bvc_position_agent::{
        protocol::{position_url, HostEvent},
        Coordinates, Dimension, GameType, Orientation, Payload, PlayerSample,
    };
    use serde_json::{json, Value};

    // -----------------------------------------------------------------------
    // Dimension aliases
    // -----------------------------------------------------------------------

    #[test]
    fn minecraft_aliases_resolve_to_canonical_dimensions() {
        let cases = [
            ("minecraft:overworld", Dimension::OVERWORLD),
            ("overworld", Dimension::OVERWORLD),
            ("world", Dimension::OVERWORLD),
            ("minecraft:the_nether", Dimension::NETHER),
            ("the_nether", Dimension::NETHER),
            ("nether", Dimension::NETHER),
            ("world_nether", Dimension::NETHER),
            ("minecraft:the_end", Dimension::THE_END),
            ("the_end", Dimension::THE_END),
            ("world_the_end", Dimension::THE_END),
        ];
        for (raw, expected) in cases {
            assert_eq!(Dimension::parse(GameType::Minecraft, raw), expected, "{raw}");
        }
    }

    #[test]
    fn minecraft_aliases_ignore_case() {
        assert_eq!(
            Dimension::parse(GameType::Minecraft, "World_Nether"),
            Dimension::NETHER
        );
        assert_eq!(
            Dimension::parse(GameType::Minecraft, "MINECRAFT:THE_END"),
            Dimension::THE_END
        );
    }

    #[test]
    fn minecraft_world_folders_fall_back_to_substring_match() {
        assert_eq!(
            Dimension::parse(GameType::Minecraft, "survival_nether"),
            Dimension::NETHER
        );
        assert_eq!(
            Dimension::parse(GameType::Minecraft, "skyblock_the_end"),
            Dimension::THE_END
        );
        assert_eq!(
            Dimension::parse(GameType::Minecraft, "my_overworld_2"),
            Dimension::OVERWORLD
        );
    }

    #[test]
    fn hytale_knows_only_orbis() {
        assert_eq!(Dimension::parse(GameType::Hytale, "Orbis"), Dimension::ORBIS);
        // Minecraft names mean nothing to the orbis host.
        assert!(Dimension::parse(GameType::Hytale, "nether").is_custom());
    }

    #[test]
    fn canonical_tokens_round_trip() {
        let tokens = [
            (GameType::Minecraft, "overworld"),
            (GameType::Minecraft, "nether"),
            (GameType::Minecraft, "the_end"),
            (GameType::Hytale, "orbis"),
        ];
        for (game, token) in tokens {
            assert_eq!(Dimension::parse(game, token).to_wire(), token);
        }
    }

    #[test]
    fn unknown_strings_pass_through_unchanged() {
        for raw in ["Zone1_Emerald", "creative_plots", "a b c", ""] {
            for game in [GameType::Minecraft, GameType::Hytale] {
                let d = Dimension::parse(game, raw);
                assert!(d.is_custom(), "{raw} for {game}");
                assert_eq!(d.to_wire(), raw);
            }
        }
    }

    #[test]
    fn absent_dimension_stays_absent() {
        assert_eq!(Dimension::parse_opt(GameType::Minecraft, None), None);
        assert_eq!(
            Dimension::parse_opt(GameType::Minecraft, Some("world")),
            Some(Dimension::OVERWORLD)
        );
    }

    // -----------------------------------------------------------------------
    // Samples
    // -----------------------------------------------------------------------

    #[test]
    fn nether_registry_key_maps_to_nether_token() {
        let sample = PlayerSample::new(
            "Steve",
            Coordinates::new(1.0, 64.0, -3.5),
            Orientation::new(90.0, -10.0),
        )
        .with_dimension(Dimension::parse_opt(
            GameType::Minecraft,
            Some("minecraft:the_nether"),
        ));
        assert_eq!(sample.dimension.as_deref(), Some("nether"));
    }

    #[test]
    fn orientation_x_is_yaw_and_y_is_pitch() {
        let o = Orientation::new(135.0, -45.0);
        assert_eq!(o.x, 135.0);
        assert_eq!(o.y, -45.0);
        assert_eq!(o.yaw(), 135.0);
        assert_eq!(o.pitch(), -45.0);
    }

    // -----------------------------------------------------------------------
    // Payload
    // -----------------------------------------------------------------------

    #[test]
    fn payload_serialises_to_receiver_shape() {
        let payload = Payload::new(
            GameType::Minecraft,
            vec![PlayerSample::new(
                "Alex",
                Coordinates::new(10.5, 70.0, -20.25),
                Orientation::new(180.0, 15.0),
            )
            .with_dimension(Some(Dimension::OVERWORLD))
            .with_deafen(true)],
        );

        let body: Value = serde_json::from_slice(&payload.to_json_bytes().unwrap()).unwrap();
        assert_eq!(
            body,
            json!({
                "game": "minecraft",
                "players": [{
                    "name": "Alex",
                    "coordinates": { "x": 10.5, "y": 70.0, "z": -20.25 },
                    "orientation": { "x": 180.0, "y": 15.0 },
                    "dimension": "overworld",
                    "world_uuid": null,
                    "deafen": true
                }]
            })
        );
    }

    #[test]
    fn unknown_dimension_and_world_are_explicit_nulls() {
        let payload = Payload::new(
            GameType::Minecraft,
            vec![PlayerSample::new(
                "Alex",
                Coordinates::origin(),
                Orientation::new(0.0, 0.0),
            )],
        );
        let body: Value = serde_json::from_slice(&payload.to_json_bytes().unwrap()).unwrap();
        let player = &body["players"][0];
        let obj = player.as_object().unwrap();
        assert!(obj.contains_key("dimension"));
        assert!(obj.contains_key("world_uuid"));
        assert!(player["dimension"].is_null());
        assert!(player["world_uuid"].is_null());
    }

    #[test]
    fn orbis_sample_carries_world_uuid() {
        let uuid = "aaaaaaaa-bbbb-cccc-dddd-eeeeeeeeeeee";
        let payload = Payload::new(
            GameType::Hytale,
            vec![PlayerSample::new(
                "Kweebec",
                Coordinates::new(1.0, 2.0, 3.0),
                Orientation::new(0.0, 0.0),
            )
            .with_dimension(Some(Dimension::ORBIS))
            .with_world_uuid(uuid)],
        );
        let body: Value = serde_json::from_slice(&payload.to_json_bytes().unwrap()).unwrap();
        assert_eq!(body["game"], "hytale");
        assert_eq!(body["players"][0]["dimension"], "orbis");
        assert_eq!(body["players"][0]["world_uuid"], uuid);
        assert_eq!(body["players"][0]["deafen"], false);
    }

    #[test]
    fn nameless_sample_is_a_serialization_error() {
        let payload = Payload::new(
            GameType::Minecraft,
            vec![PlayerSample::new(
                "",
                Coordinates::origin(),
                Orientation::new(0.0, 0.0),
            )],
        );
        assert!(payload.to_json_bytes().is_err());
    }

    #[test]
    fn empty_payload_is_still_valid_json() {
        let payload = Payload::new(GameType::Hytale, Vec::new());
        assert!(payload.is_empty());
        let body: Value = serde_json::from_slice(&payload.to_json_bytes().unwrap()).unwrap();
        assert_eq!(body, json!({ "game": "hytale", "players": [] }));
    }

    // -----------------------------------------------------------------------
    // Endpoint and host events
    // -----------------------------------------------------------------------

    #[test]
    fn position_url_appends_path_once() {
        assert_eq!(
            position_url("https://bvc.example.com"),
            "https://bvc.example.com/api/position"
        );
        assert_eq!(
            position_url("https://bvc.example.com/"),
            "https://bvc.example.com/api/position"
        );
    }

    #[test]
    fn host_events_decode_with_optional_fields() {
        let ev: HostEvent =
            serde_json::from_str(r#"{"event":"move","id":"p1","x":1,"y":2,"z":3}"#).unwrap();
        match ev {
            HostEvent::Move {
                id,
                yaw,
                dimension,
                sneaking,
                ..
            } => {
                assert_eq!(id, "p1");
                assert_eq!(yaw, 0.0);
                assert_eq!(dimension, None);
                assert!(!sneaking);
            }
            other => panic!("unexpected event {other:?}"),
        }

        let ev: HostEvent = serde_json::from_str(r#"{"event":"leave","id":"p1"}"#).unwrap();
        assert_eq!(ev.player_id(), "p1");
    }
}
