//! Iterative resolution engine.
//!
//! Walks the DNS hierarchy from a random root hint: each upstream response
//! either answers the question, delegates (with or without glue), reports
//! NXDOMAIN, or dead-ends. Recoverable failures always materialize as a
//! NAME_ERROR response; the engine never returns an error to its callers.

use std::net::{IpAddr, SocketAddr};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::future::{BoxFuture, FutureExt};
use rand::seq::SliceRandom;
use tracing::{debug, warn};

use crate::cache::AnswerCache;
use crate::hints;
use crate::stats::Stats;
use crate::transport::{UdpExchange, DEFAULT_TIMEOUT};
use crate::wire::{Message, Question, RData, Rcode, Record, RecordType};

/// Tunables for the iterative walk.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Upstream port. 53 everywhere but tests.
    pub upstream_port: u16,
    /// Per-attempt upstream timeout.
    pub attempt_timeout: Duration,
    /// Wall-clock budget for one client question.
    pub question_deadline: Duration,
    /// Delegation steps per lookup.
    pub max_referrals: u32,
    /// Recursive lookups (CNAME chase, glue-less NS resolution) per question.
    pub max_lookups: u32,
    /// Chase CNAME targets with the client's original qtype instead of CNAME.
    pub requery_original_qtype: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            upstream_port: 53,
            attempt_timeout: DEFAULT_TIMEOUT,
            question_deadline: Duration::from_secs(10),
            max_referrals: 16,
            max_lookups: 32,
            requery_original_qtype: false,
        }
    }
}

/// Recursion budget shared across one client question.
struct LookupBudget {
    remaining: AtomicU32,
}

impl LookupBudget {
    fn new(limit: u32) -> Self {
        Self {
            remaining: AtomicU32::new(limit),
        }
    }

    fn take(&self) -> bool {
        self.remaining
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| n.checked_sub(1))
            .is_ok()
    }
}

/// The recursive resolver: cache in front, iterative walk behind.
pub struct Resolver {
    transport: Arc<dyn UdpExchange>,
    cache: AnswerCache,
    stats: Arc<Stats>,
    config: ResolverConfig,
}

impl Resolver {
    pub fn new(
        transport: Arc<dyn UdpExchange>,
        cache: AnswerCache,
        stats: Arc<Stats>,
        config: ResolverConfig,
    ) -> Self {
        Self {
            transport,
            cache,
            stats,
            config,
        }
    }

    /// Resolves every question in `request` serially, cache first, and
    /// returns the first per-question response. `None` only for a request
    /// without questions.
    pub async fn resolve(&self, request: &Message) -> Option<Message> {
        let mut responses = Vec::with_capacity(request.questions.len());

        for question in &request.questions {
            let started = Instant::now();
            self.stats.record_query();

            if let Some(cached) = self.cache.get(question).await {
                debug!(name = %question.name, qtype = ?question.qtype, "cache hit");
                self.stats
                    .record_cache_hit(started.elapsed().as_secs_f64() * 1000.0);
                responses.push(self.cached_response(request, question, cached));
                continue;
            }

            let mut subquery = Message {
                header: request.header,
                questions: vec![question.clone()],
                answers: Vec::new(),
                authorities: Vec::new(),
                additionals: Vec::new(),
            };
            subquery.header.qdcount = 1;

            let budget = LookupBudget::new(self.config.max_lookups);
            let deadline = self.config.question_deadline;
            let response =
                match tokio::time::timeout(deadline, self.lookup(subquery.clone(), &budget)).await {
                    Ok(response) => response,
                    Err(_) => {
                        warn!(name = %question.name, "question deadline exceeded");
                        self.failure_response(&subquery, Vec::new(), Vec::new())
                    }
                };

            if response.header.rcode == Rcode::NoError && !response.answers.is_empty() {
                self.cache.set(question, &response.answers).await;
                self.stats
                    .record_resolved(started.elapsed().as_secs_f64() * 1000.0);
            } else {
                self.stats
                    .record_failed(started.elapsed().as_secs_f64() * 1000.0);
            }
            responses.push(response);
        }

        responses.into_iter().next()
    }

    /// One iterative walk for the first question of `query`.
    fn lookup<'a>(&'a self, query: Message, budget: &'a LookupBudget) -> BoxFuture<'a, Message> {
        async move {
            let Some(question) = query.first_question().cloned() else {
                return self.failure_response(&query, Vec::new(), Vec::new());
            };

            let packet = match query.encode() {
                Ok(packet) => packet,
                Err(error) => {
                    warn!(name = %question.name, %error, "unencodable upstream query");
                    return self.failure_response(&query, Vec::new(), Vec::new());
                }
            };

            let root = hints::random_root();
            let mut next_server = IpAddr::V4(root.ipv4);
            let mut queried_name = question.name.clone();

            for _ in 0..self.config.max_referrals {
                let addr = SocketAddr::new(next_server, self.config.upstream_port);
                debug!(server = %addr, name = %queried_name, qtype = ?question.qtype, "querying upstream");
                self.stats.record_upstream_query();

                let response = match self
                    .transport
                    .query(&packet, addr, self.config.attempt_timeout)
                    .await
                {
                    Ok(response) => response,
                    Err(error) => {
                        debug!(server = %addr, %error, "upstream exchange failed");
                        return self.failure_response(&query, Vec::new(), Vec::new());
                    }
                };

                if response.header.rcode == Rcode::NameError {
                    return normalize_response(response);
                }

                if !response.answers.is_empty() {
                    return self.answer_response(&query, &question, response, budget).await;
                }

                // IPv4 glue in the additional section: jump straight to it.
                let glue: Vec<&Record> = response
                    .additionals
                    .iter()
                    .filter(|record| matches!(record.rdata, RData::A(_)))
                    .collect();
                if let Some(chosen) = glue.choose(&mut rand::thread_rng()) {
                    if let RData::A(ip) = chosen.rdata {
                        queried_name = chosen.name.clone();
                        next_server = IpAddr::V4(ip);
                        continue;
                    }
                }

                if !response.authorities.is_empty() {
                    // Rename each authority to the host its rdata points at
                    // and keep the ones that look like resolvable hostnames.
                    let mut candidates: Vec<Record> = Vec::new();
                    for authority in &response.authorities {
                        let mut candidate = authority.clone();
                        match &authority.rdata {
                            RData::Ns(target) | RData::Cname(target) => {
                                candidate.name = target.clone();
                            }
                            RData::Soa(_) => {}
                            _ => continue,
                        }
                        if is_valid_hostname(&candidate.name) {
                            candidates.push(candidate);
                        }
                    }

                    let chosen = {
                        let mut rng = rand::thread_rng();
                        candidates.choose(&mut rng).cloned()
                    };
                    if let Some(chosen) = chosen {
                        if chosen.rtype == RecordType::Soa {
                            // NXDOMAIN, communicated through the SOA.
                            return self.failure_response(
                                &query,
                                response.authorities,
                                response.additionals,
                            );
                        }

                        if !budget.take() {
                            warn!(name = %question.name, "lookup budget exhausted");
                            return self.failure_response(&query, Vec::new(), Vec::new());
                        }
                        let ns_query = Message::query(query.header.id, &chosen.name, RecordType::A);
                        let ns_response = self.lookup(ns_query, budget).await;
                        let addresses: Vec<&Record> = ns_response
                            .answers
                            .iter()
                            .filter(|record| matches!(record.rdata, RData::A(_)))
                            .collect();
                        if let Some(next) = addresses.choose(&mut rand::thread_rng()) {
                            if let RData::A(ip) = next.rdata {
                                queried_name = next.name.clone();
                                next_server = IpAddr::V4(ip);
                                continue;
                            }
                        }
                    }
                }

                // No answer, no glue, no usable delegation.
                return self.failure_response(&query, response.authorities, Vec::new());
            }

            warn!(name = %question.name, "referral limit reached");
            self.failure_response(&query, Vec::new(), Vec::new())
        }
        .boxed()
    }

    /// Builds the final answer response, chasing CNAMEs first. The chase
    /// list grows as sub-lookups append their answers, so chains are
    /// followed end to end and loops run into the lookup budget.
    async fn answer_response(
        &self,
        query: &Message,
        question: &Question,
        response: Message,
        budget: &LookupBudget,
    ) -> Message {
        let rcode = response.header.rcode;
        let mut answers = response.answers;

        if question.qtype != RecordType::Cname {
            let chase_type = if self.config.requery_original_qtype {
                question.qtype
            } else {
                RecordType::Cname
            };

            let mut index = 0;
            while index < answers.len() {
                let target = match &answers[index].rdata {
                    RData::Cname(target) => target.clone(),
                    _ => {
                        index += 1;
                        continue;
                    }
                };
                index += 1;

                if !budget.take() {
                    warn!(name = %question.name, "cname chase budget exhausted");
                    return self.failure_response(query, Vec::new(), Vec::new());
                }
                debug!(target = %target, qtype = ?chase_type, "chasing cname");
                let chase = Message::query(query.header.id, &target, chase_type);
                let chased = self.lookup(chase, budget).await;
                answers.extend(chased.answers);
            }
        }

        let mut header = query.header;
        header.qr = true;
        header.aa = false;
        header.ra = true;
        header.rcode = rcode;
        header.qdcount = 1;
        header.ancount = answers.len() as u16;
        header.nscount = 0;
        header.arcount = 0;
        Message {
            header,
            questions: vec![question.clone()],
            answers,
            authorities: Vec::new(),
            additionals: Vec::new(),
        }
    }

    /// Synthesizes a cache-hit response under the client's header.
    fn cached_response(
        &self,
        request: &Message,
        question: &Question,
        answers: Vec<Record>,
    ) -> Message {
        let mut header = request.header;
        header.qr = true;
        header.ra = true;
        header.rcode = Rcode::NoError;
        header.qdcount = 1;
        header.ancount = answers.len() as u16;
        header.nscount = 0;
        header.arcount = 0;
        Message {
            header,
            questions: vec![question.clone()],
            answers,
            authorities: Vec::new(),
            additionals: Vec::new(),
        }
    }

    /// NAME_ERROR response for `query`, carrying the given sections.
    fn failure_response(
        &self,
        query: &Message,
        authorities: Vec<Record>,
        additionals: Vec<Record>,
    ) -> Message {
        let mut header = query.header;
        header.qr = true;
        header.aa = false;
        header.ra = true;
        header.rcode = Rcode::NameError;
        header.qdcount = query.questions.len() as u16;
        header.ancount = 0;
        header.nscount = authorities.len() as u16;
        header.arcount = additionals.len() as u16;
        Message {
            header,
            questions: query.questions.clone(),
            answers: Vec::new(),
            authorities,
            additionals,
        }
    }
}

/// Normalizes an upstream NXDOMAIN for the client.
fn normalize_response(mut response: Message) -> Message {
    response.header.qr = true;
    response.header.aa = false;
    response.header.ra = true;
    response.header.rcode = Rcode::NameError;
    response
}

/// Hostname shape accepted for delegation targets: dot-separated
/// alphanumeric/hyphen labels of at most 63 bytes, ending in an alphabetic
/// TLD of at least two characters.
pub(crate) fn is_valid_hostname(name: &str) -> bool {
    let name = name.strip_suffix('.').unwrap_or(name);
    if name.is_empty() {
        return false;
    }
    let labels: Vec<&str> = name.split('.').collect();
    for label in &labels {
        if label.is_empty() || label.len() > 63 {
            return false;
        }
        if !label
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            return false;
        }
    }
    let tld = labels[labels.len() - 1];
    tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{AnswerCache, MemoryStore};
    use crate::transport::testing::{
        a_record, cname_record, ns_record, soa_record, ScriptedExchange, ScriptedReply,
    };
    use crate::wire::RecordClass;

    fn resolver(exchange: Arc<ScriptedExchange>) -> Resolver {
        resolver_with(exchange, Arc::new(MemoryStore::new()), ResolverConfig::default())
    }

    fn resolver_with(
        exchange: Arc<ScriptedExchange>,
        store: Arc<MemoryStore>,
        config: ResolverConfig,
    ) -> Resolver {
        Resolver::new(
            exchange,
            AnswerCache::new(store),
            Arc::new(Stats::new()),
            config,
        )
    }

    fn request(name: &str, qtype: RecordType) -> Message {
        Message::query(0x04D2, name, qtype)
    }

    #[tokio::test]
    async fn answer_straight_from_the_root() {
        let exchange = Arc::new(ScriptedExchange::new());
        exchange.route(
            None,
            "example.com",
            RecordType::A,
            ScriptedReply::answers(vec![a_record("example.com", "93.184.216.34", 3600)]),
        );
        let resolver = resolver(Arc::clone(&exchange));

        let response = resolver.resolve(&request("example.com", RecordType::A)).await.unwrap();

        assert_eq!(response.header.id, 0x04D2);
        assert!(response.header.qr);
        assert!(response.header.ra);
        assert_eq!(response.header.rcode, Rcode::NoError);
        assert_eq!(response.answers.len(), 1);
        assert_eq!(response.header.ancount, 1);
        assert_eq!(exchange.call_count(), 1);
    }

    #[tokio::test]
    async fn walks_delegations_with_glue() {
        let exchange = Arc::new(ScriptedExchange::new());
        exchange.route(
            None,
            "example.com",
            RecordType::A,
            ScriptedReply::referral(
                vec![ns_record("com", "a.gtld-servers.net")],
                vec![a_record("a.gtld-servers.net", "192.0.43.10", 172_800)],
            ),
        );
        exchange.route(
            Some("192.0.43.10"),
            "example.com",
            RecordType::A,
            ScriptedReply::referral(
                vec![ns_record("example.com", "ns.example.com")],
                vec![a_record("ns.example.com", "203.0.113.5", 172_800)],
            ),
        );
        exchange.route(
            Some("203.0.113.5"),
            "example.com",
            RecordType::A,
            ScriptedReply::answers(vec![a_record("example.com", "93.184.216.34", 3600)]),
        );
        let resolver = resolver(Arc::clone(&exchange));

        let response = resolver.resolve(&request("example.com", RecordType::A)).await.unwrap();

        assert_eq!(response.header.id, 0x04D2);
        assert!(response.header.qr && response.header.ra);
        assert_eq!(response.header.rcode, Rcode::NoError);
        assert_eq!(response.header.ancount, 1);
        assert_eq!(response.answers[0].ttl, 3600);
        assert_eq!(
            response.answers[0].rdata,
            RData::A("93.184.216.34".parse().unwrap())
        );
        // Root, TLD, authoritative: one hop per delegation.
        assert_eq!(exchange.call_count(), 3);
    }

    #[tokio::test]
    async fn second_identical_query_is_served_from_cache() {
        let exchange = Arc::new(ScriptedExchange::new());
        exchange.route(
            None,
            "example.com",
            RecordType::A,
            ScriptedReply::answers(vec![a_record("example.com", "93.184.216.34", 3600)]),
        );
        let resolver = resolver(Arc::clone(&exchange));

        let first = resolver.resolve(&request("example.com", RecordType::A)).await.unwrap();
        let calls_after_first = exchange.call_count();
        let second = resolver.resolve(&request("example.com", RecordType::A)).await.unwrap();

        assert_eq!(exchange.call_count(), calls_after_first);
        assert_eq!(second.answers, first.answers);
        assert!(second.header.qr && second.header.ra);
    }

    #[tokio::test]
    async fn upstream_nxdomain_passes_through() {
        let exchange = Arc::new(ScriptedExchange::new());
        exchange.route(
            None,
            "nosuch.example.com",
            RecordType::A,
            ScriptedReply::nxdomain(vec![soa_record("example.com")]),
        );
        let resolver = resolver(exchange);

        let response = resolver
            .resolve(&request("nosuch.example.com", RecordType::A))
            .await
            .unwrap();

        assert_eq!(response.header.rcode, Rcode::NameError);
        assert!(response.header.qr && response.header.ra);
        assert_eq!(response.authorities.len(), 1);
    }

    #[tokio::test]
    async fn soa_authority_means_nxdomain() {
        let exchange = Arc::new(ScriptedExchange::new());
        exchange.route(
            None,
            "nosuch.com",
            RecordType::A,
            ScriptedReply::referral(vec![soa_record("com")], Vec::new()),
        );
        let resolver = resolver(exchange);

        let response = resolver.resolve(&request("nosuch.com", RecordType::A)).await.unwrap();

        assert_eq!(response.header.rcode, Rcode::NameError);
        assert_eq!(response.header.nscount, 1);
        assert_eq!(response.authorities[0].rtype, RecordType::Soa);
    }

    #[tokio::test]
    async fn cname_answers_are_chased() {
        let exchange = Arc::new(ScriptedExchange::new());
        exchange.route(
            None,
            "www.example.com",
            RecordType::A,
            ScriptedReply::answers(vec![cname_record("www.example.com", "example.com")]),
        );
        exchange.route(
            None,
            "example.com",
            RecordType::Cname,
            ScriptedReply::answers(vec![a_record("example.com", "93.184.216.34", 3600)]),
        );
        let resolver = resolver(exchange);

        let response = resolver
            .resolve(&request("www.example.com", RecordType::A))
            .await
            .unwrap();

        assert_eq!(response.header.rcode, Rcode::NoError);
        assert_eq!(response.answers.len(), 2);
        assert_eq!(
            response.answers[0].rdata,
            RData::Cname("example.com".to_string())
        );
        assert_eq!(
            response.answers[1].rdata,
            RData::A("93.184.216.34".parse().unwrap())
        );
    }

    #[tokio::test]
    async fn cname_chase_can_requery_the_original_qtype() {
        let exchange = Arc::new(ScriptedExchange::new());
        exchange.route(
            None,
            "www.example.com",
            RecordType::A,
            ScriptedReply::answers(vec![cname_record("www.example.com", "example.com")]),
        );
        exchange.route(
            None,
            "example.com",
            RecordType::A,
            ScriptedReply::answers(vec![a_record("example.com", "93.184.216.34", 3600)]),
        );
        let config = ResolverConfig {
            requery_original_qtype: true,
            ..ResolverConfig::default()
        };
        let resolver = resolver_with(exchange, Arc::new(MemoryStore::new()), config);

        let response = resolver
            .resolve(&request("www.example.com", RecordType::A))
            .await
            .unwrap();

        assert_eq!(response.answers.len(), 2);
        assert_eq!(
            response.answers[1].rdata,
            RData::A("93.184.216.34".parse().unwrap())
        );
    }

    #[tokio::test]
    async fn cname_query_type_is_not_chased() {
        let exchange = Arc::new(ScriptedExchange::new());
        exchange.route(
            None,
            "www.example.com",
            RecordType::Cname,
            ScriptedReply::answers(vec![cname_record("www.example.com", "example.com")]),
        );
        let resolver = resolver(Arc::clone(&exchange));

        let response = resolver
            .resolve(&request("www.example.com", RecordType::Cname))
            .await
            .unwrap();

        assert_eq!(response.answers.len(), 1);
        assert_eq!(exchange.call_count(), 1);
    }

    #[tokio::test]
    async fn cname_loop_hits_the_budget_and_fails() {
        let exchange = Arc::new(ScriptedExchange::new());
        exchange.route(
            None,
            "a.example.com",
            RecordType::A,
            ScriptedReply::answers(vec![cname_record("a.example.com", "b.example.com")]),
        );
        exchange.route(
            None,
            "b.example.com",
            RecordType::Cname,
            ScriptedReply::answers(vec![cname_record("b.example.com", "a.example.com")]),
        );
        exchange.route(
            None,
            "a.example.com",
            RecordType::Cname,
            ScriptedReply::answers(vec![cname_record("a.example.com", "b.example.com")]),
        );
        let resolver = resolver(Arc::clone(&exchange));

        let response = resolver
            .resolve(&request("a.example.com", RecordType::A))
            .await
            .unwrap();

        assert_eq!(response.header.rcode, Rcode::NameError);
        // One initial exchange plus at most one per budgeted sub-lookup.
        assert!(exchange.call_count() <= 1 + 32);
    }

    #[tokio::test]
    async fn glueless_delegation_resolves_the_nameserver() {
        let exchange = Arc::new(ScriptedExchange::new());
        exchange.route(
            None,
            "example.com",
            RecordType::A,
            ScriptedReply::referral(vec![ns_record("example.com", "ns.example.net")], Vec::new()),
        );
        exchange.route(
            None,
            "ns.example.net",
            RecordType::A,
            ScriptedReply::answers(vec![a_record("ns.example.net", "203.0.113.9", 3600)]),
        );
        exchange.route(
            Some("203.0.113.9"),
            "example.com",
            RecordType::A,
            ScriptedReply::answers(vec![a_record("example.com", "93.184.216.34", 3600)]),
        );
        let resolver = resolver(Arc::clone(&exchange));

        let response = resolver.resolve(&request("example.com", RecordType::A)).await.unwrap();

        assert_eq!(response.header.rcode, Rcode::NoError);
        assert_eq!(response.answers.len(), 1);
        assert_eq!(exchange.call_count(), 3);
    }

    #[tokio::test]
    async fn unusable_authorities_fail_with_sections_attached() {
        let exchange = Arc::new(ScriptedExchange::new());
        exchange.route(
            None,
            "example.com",
            RecordType::A,
            ScriptedReply::referral(vec![ns_record("com", "bad_host!")], Vec::new()),
        );
        let resolver = resolver(exchange);

        let response = resolver.resolve(&request("example.com", RecordType::A)).await.unwrap();

        assert_eq!(response.header.rcode, Rcode::NameError);
        assert_eq!(response.header.nscount, 1);
        assert_eq!(response.authorities[0].rtype, RecordType::Ns);
    }

    #[tokio::test]
    async fn dead_upstream_yields_name_error() {
        let resolver = resolver(Arc::new(ScriptedExchange::new()));

        let response = resolver.resolve(&request("example.com", RecordType::A)).await.unwrap();

        assert_eq!(response.header.rcode, Rcode::NameError);
        assert!(response.header.qr && response.header.ra);
        assert!(response.answers.is_empty());
        assert!(response.authorities.is_empty());
        assert!(response.additionals.is_empty());
    }

    #[tokio::test]
    async fn glue_loop_stops_at_the_referral_limit() {
        let exchange = Arc::new(ScriptedExchange::new());
        exchange.route(
            None,
            "example.com",
            RecordType::A,
            ScriptedReply::referral(
                vec![ns_record("com", "ns.example.com")],
                vec![a_record("ns.example.com", "198.51.100.7", 3600)],
            ),
        );
        let resolver = resolver(Arc::clone(&exchange));

        let response = resolver.resolve(&request("example.com", RecordType::A)).await.unwrap();

        assert_eq!(response.header.rcode, Rcode::NameError);
        assert_eq!(exchange.call_count(), 16);
    }

    #[tokio::test]
    async fn first_question_wins_for_multi_question_requests() {
        let exchange = Arc::new(ScriptedExchange::new());
        exchange.route(
            None,
            "first.example.com",
            RecordType::A,
            ScriptedReply::answers(vec![a_record("first.example.com", "192.0.2.1", 60)]),
        );
        exchange.route(
            None,
            "second.example.com",
            RecordType::A,
            ScriptedReply::answers(vec![a_record("second.example.com", "192.0.2.2", 60)]),
        );
        let resolver = resolver(exchange);

        let mut request = request("first.example.com", RecordType::A);
        request.questions.push(Question {
            name: "second.example.com".to_string(),
            qtype: RecordType::A,
            qclass: RecordClass::In,
        });

        let response = resolver.resolve(&request).await.unwrap();

        assert_eq!(response.questions.len(), 1);
        assert_eq!(response.questions[0].name, "first.example.com");
        assert_eq!(response.answers[0].rdata, RData::A("192.0.2.1".parse().unwrap()));
    }

    #[tokio::test]
    async fn preseeded_cache_answers_without_upstream_traffic() {
        let exchange = Arc::new(ScriptedExchange::new());
        let store = Arc::new(MemoryStore::new());
        let answers = vec![a_record("example.com", "93.184.216.34", 3600)];
        let question = Question {
            name: "example.com".to_string(),
            qtype: RecordType::A,
            qclass: RecordClass::In,
        };
        AnswerCache::new(Arc::clone(&store) as Arc<dyn crate::cache::CacheStore>)
            .set(&question, &answers)
            .await;
        let resolver = resolver_with(Arc::clone(&exchange), store, ResolverConfig::default());

        let response = resolver.resolve(&request("example.com", RecordType::A)).await.unwrap();

        assert_eq!(exchange.call_count(), 0);
        assert_eq!(response.answers, answers);
        assert_eq!(response.header.ancount, 1);
    }

    #[test]
    fn hostname_validity() {
        assert!(is_valid_hostname("example.com"));
        assert!(is_valid_hostname("a.gtld-servers.net"));
        assert!(is_valid_hostname("com"));
        assert!(is_valid_hostname("example.com."));

        assert!(!is_valid_hostname(""));
        assert!(!is_valid_hostname("bad_host!"));
        assert!(!is_valid_hostname("example..com"));
        assert!(!is_valid_hostname("example.c"));
        assert!(!is_valid_hostname("example.c0m"));
        assert!(!is_valid_hostname(&format!("{}.com", "a".repeat(64))));
    }
}
