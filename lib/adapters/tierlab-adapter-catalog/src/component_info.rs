use tierlab_domain::{ComponentId, ComponentInfo};
use tierlab_ports::ComponentInfoPort;

/// Reference text for every diagram node and control section.
#[derive(Clone, Default)]
pub struct StaticComponentInfo;

impl ComponentInfoPort for StaticComponentInfo {
    fn info(&self, id: ComponentId) -> Option<ComponentInfo> {
        Some(component_info(id))
    }
}

struct Entry<'a> {
    title: &'a str,
    overview: &'a str,
    affected_by: &'a [&'a str],
    affects: &'a [&'a str],
    symptoms: &'a [&'a str],
    fixes: &'a [&'a str],
    notes: &'a [&'a str],
}

impl Entry<'_> {
    fn into_info(self, id: ComponentId) -> ComponentInfo {
        let owned = |items: &[&str]| items.iter().map(|item| item.to_string()).collect();
        ComponentInfo {
            id,
            title: self.title.to_string(),
            overview: self.overview.to_string(),
            affects: owned(self.affects),
            affected_by: owned(self.affected_by),
            symptoms: owned(self.symptoms),
            fixes: owned(self.fixes),
            notes: owned(self.notes),
        }
    }
}

pub fn component_info(id: ComponentId) -> ComponentInfo {
    let entry = match id {
        ComponentId::Client => Entry {
            title: "Clients",
            overview: "Traffic source for the system. Controls how many requests enter and the read/write mix.",
            affected_by: &["RPS", "Read ratio", "Payload size"],
            affects: &[
                "Load on App tier",
                "Cache/DB volume",
                "Latency & errors once downstream saturates",
            ],
            symptoms: &[
                "Not a bottleneck itself; exposes downstream bottlenecks as load increases",
            ],
            fixes: &["Rate limit", "Smooth bursts (queue)", "Use CDN/edge caching"],
            notes: &["This is a simplified single-service traffic model."],
        },
        ComponentId::Lb => Entry {
            title: "Load Balancer",
            overview: "Routes traffic to the app tier. LB effects are represented indirectly through app saturation and tail latency.",
            affected_by: &["Total RPS", "App tier health"],
            affects: &["Distribution to app tier", "Tail latency under overload"],
            symptoms: &["Usually not the first bottleneck in the simplified model"],
            fixes: &[
                "Fix the app/DB bottleneck (the LB alone won't solve it)",
                "Health checks and circuit breakers",
            ],
            notes: &["Real LBs can bottleneck (TLS, connection limits); omitted here."],
        },
        ComponentId::App => Entry {
            title: "App Servers",
            overview: "Processes requests (compute + business logic). Capacity is driven by instances and per-instance throughput.",
            affected_by: &["Instances", "RPS per instance", "Autoscaling toggle", "Incoming RPS"],
            affects: &[
                "Latency via queueing",
                "Downstream load (cache/DB)",
                "Errors when overloaded",
            ],
            symptoms: &[
                "High saturation pushes p95 up early",
                "Overload causes queue overflow and timeouts, so errors rise",
            ],
            fixes: &[
                "Add instances",
                "Increase per-instance capacity (optimize)",
                "Rate limiting or queueing",
            ],
            notes: &["Assumes near-linear scaling with instances."],
        },
        ComponentId::Cache => Entry {
            title: "Cache",
            overview: "Speeds up reads and reduces DB read load. Effectiveness depends on hit rate and cache capacity.",
            affected_by: &[
                "Cache enabled",
                "Hit rate",
                "Cache capacity",
                "Payload size (can reduce hit rate)",
            ],
            affects: &[
                "DB reads (misses become DB reads)",
                "Latency (hits fast, misses slow)",
                "Bottleneck shifts",
            ],
            symptoms: &[
                "Low hit rate keeps the DB saturated",
                "Cache saturation causes cascading misses and timeouts",
            ],
            fixes: &[
                "Increase cache capacity",
                "Improve hit rate (keys, TTL, warmup)",
                "Multi-layer caching",
            ],
            notes: &["Cache helps reads; it doesn't remove write load from the DB."],
        },
        ComponentId::Db => Entry {
            title: "Database",
            overview: "Persists data and serves cache-miss reads + writes. Usually hardest to scale and often becomes the bottleneck.",
            affected_by: &[
                "DB capacity (QPS)",
                "Write penalty",
                "Replication (read boost)",
                "Partitioning (write boost)",
                "Cache hit rate (reduces reads)",
            ],
            affects: &[
                "Tail latency strongly near saturation",
                "Errors (timeouts) when overloaded",
                "Overall bottleneck",
            ],
            symptoms: &[
                "Near 100% saturation p95 spikes",
                "Overload produces timeouts and errors",
                "Scaling the app doesn't fix a DB bottleneck",
            ],
            fixes: &[
                "Increase DB capacity",
                "Replication for reads",
                "Partitioning for writes",
                "Improve cache hit rate",
            ],
            notes: &["Locks, IO and indexes are approximated via QPS + penalties."],
        },
        ComponentId::PresetSection => Entry {
            title: "Quick Presets",
            overview: "Curated configurations representing common system profiles (baseline, read-heavy, write-heavy, spiky traffic, high-scale).",
            affected_by: &["Preset selection"],
            affects: &["Updates all knobs at once (traffic + tiers + toggles)"],
            symptoms: &["The wrong preset may hide the bottleneck you want to study"],
            fixes: &["Start with the closest preset then tune one knob at a time"],
            notes: &["Presets are meant for fast exploration and demos."],
        },
        ComponentId::TrafficSection => Entry {
            title: "Traffic",
            overview: "Incoming demand: total throughput (RPS), read/write split and payload size. These drive load and influence caching efficiency.",
            affected_by: &["RPS", "Read ratio", "Payload size"],
            affects: &[
                "App saturation (direct)",
                "Cache load (reads)",
                "DB load (writes + cache misses)",
                "p95 tail latency and errors as saturation grows",
            ],
            symptoms: &[
                "Increasing RPS usually reveals the weakest tier first",
                "High load makes p95 climb before p50",
            ],
            fixes: &[
                "Reduce or shape traffic (rate limiting, queues)",
                "Increase capacity at the bottleneck tier",
                "Improve caching for read-heavy traffic",
            ],
            notes: &["Traffic is modeled uniformly across requests (no endpoint-level mix)."],
        },
        ComponentId::AppSection => Entry {
            title: "App Tier",
            overview: "Compute capacity: number of instances and throughput per instance. App saturation increases latency via queueing and produces errors when overloaded.",
            affected_by: &["Instances", "RPS/instance", "Autoscaling toggle"],
            affects: &["Latency p50/p95", "Downstream pressure on cache/DB", "System status"],
            symptoms: &[
                "p95 rises early as the app nears saturation",
                "Overload causes timeouts and queue overflow",
            ],
            fixes: &[
                "Add instances",
                "Optimize work per request",
                "Add caching or async processing",
            ],
            notes: &["App scaling doesn't help if the DB is already the bottleneck."],
        },
        ComponentId::CacheSection => Entry {
            title: "Cache",
            overview: "Reduces DB reads by serving a fraction of read traffic. Most valuable in read-heavy systems.",
            affected_by: &["Cache enabled", "Hit rate", "Cache capacity"],
            affects: &[
                "DB read load",
                "Latency improvements for reads",
                "Bottleneck shift toward cache when undersized",
            ],
            symptoms: &[
                "Low hit rate keeps the DB hot",
                "Cache saturation causes cascading misses and timeouts",
            ],
            fixes: &[
                "Increase cache capacity",
                "Improve hit rate (key design, TTL, warmup)",
                "Use layered caches",
            ],
            notes: &["Cache affects reads, not writes."],
        },
        ComponentId::DbSection => Entry {
            title: "Database",
            overview: "Handles writes and read misses. Strongly drives tail latency and errors near saturation.",
            affected_by: &[
                "DB QPS capacity",
                "Write penalty",
                "Replication toggle",
                "Partitioning toggle",
            ],
            affects: &["p95 latency", "Error rate/timeouts", "Overall bottleneck"],
            symptoms: &[
                "DB saturation causes p95 spikes",
                "Overload produces timeouts and errors",
            ],
            fixes: &[
                "Scale DB capacity",
                "Replication for reads",
                "Partitioning for writes",
                "Increase cache hit rate",
            ],
            notes: &["IO, locks and indexes are abstracted into throughput + penalty knobs."],
        },
        ComponentId::LatencySection => Entry {
            title: "Baseline Latency",
            overview: "Network + serialization + base compute cost when the system is not saturated.",
            affected_by: &["Base latency"],
            affects: &["p50 and p95 baseline floor", "Perceived responsiveness even when healthy"],
            symptoms: &["High baseline latency feels slow even without bottlenecks"],
            fixes: &[
                "Reduce network hops",
                "Optimize serialization/compression",
                "Move closer to users (CDN)",
            ],
            notes: &["Saturation-driven latency is added on top of this baseline."],
        },
    };
    entry.into_info(id)
}
