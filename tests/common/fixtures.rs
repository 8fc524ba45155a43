//! Test fixtures - compose files shared by the CLI tests.

/// Two services, one long-form and one short-form reference
pub const BASIC_COMPOSE: &str = r#"version: "3.8"
services:
  web:
    image: nginx:1.25
    configs:
      - source: app_cfg
        target: /etc/nginx/conf.d/app.conf
  worker:
    image: example/worker:2
    configs:
      - app_cfg
      - shared
networks:
  front: {}
configs:
  app_cfg:
    file: ./app.conf
  shared:
    external: true
"#;

/// Image tag comes from the environment
pub const INTERPOLATED_COMPOSE: &str = r#"version: "3.8"
services:
  web:
    image: "nginx:${WEB_TAG:-latest}"
    configs: [app_cfg]
configs:
  app_cfg:
    file: ./app.conf
"#;

/// Replica count and external flag come from the environment
pub const TYPED_INTERPOLATION_COMPOSE: &str = r#"version: "3.8"
services:
  web:
    image: nginx
    deploy:
      replicas: ${REPLICAS}
    configs: [app_cfg]
configs:
  app_cfg:
    external: ${EXTERNAL}
"#;

/// `worker` mounts a config that is never defined
pub const DANGLING_COMPOSE: &str = r#"version: "3.8"
services:
  web:
    image: nginx
    configs: [app_cfg]
  worker:
    image: busybox
    configs: [missing_cfg]
configs:
  app_cfg:
    file: ./app.conf
"#;

pub const UNSUPPORTED_VERSION_COMPOSE: &str = r#"version: "2.4"
services:
  web:
    image: nginx
"#;

pub const MALFORMED_COMPOSE: &str = "services: [unclosed\n";
